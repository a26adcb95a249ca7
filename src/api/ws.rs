use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::IntoResponse,
};
use futures::{stream::SplitSink, SinkExt, StreamExt};
use serde::Serialize;
use tokio::sync::broadcast;
use tracing::debug;

use crate::sync::{FeedUpdate, VehicleStore, VehicleUpdateSender};

#[derive(Clone)]
pub struct WsState {
    pub vehicle_store: VehicleStore,
    pub vehicle_updates_tx: VehicleUpdateSender,
}

/// Server message sent to clients
#[derive(Debug, Serialize)]
#[serde(tag = "type")]
#[serde(rename_all = "snake_case")]
enum ServerMessage {
    /// Initial connection acknowledgment
    Connected { message: String },
    /// Full replacement view-model set for one refresh cycle. Clients
    /// always receive the complete state, never a diff.
    Vehicles { update: FeedUpdate },
}

/// WebSocket endpoint pushing the full view-model set after every
/// completed refresh cycle.
pub async fn ws_vehicles(ws: WebSocketUpgrade, State(state): State<WsState>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: WsState) {
    let (mut sender, mut receiver) = socket.split();
    let mut updates_rx = state.vehicle_updates_tx.subscribe();

    let greeting = ServerMessage::Connected {
        message: "vonatradar live feed".to_string(),
    };
    if send_message(&mut sender, &greeting).await.is_err() {
        return;
    }

    // Send the current state right away when a cycle has already completed
    if let Some(update) = current_update(&state).await {
        if send_message(&mut sender, &ServerMessage::Vehicles { update })
            .await
            .is_err()
        {
            return;
        }
    }

    loop {
        tokio::select! {
            result = updates_rx.recv() => {
                match result {
                    // A lagged receiver only skipped superseded cycles; the
                    // store always holds the latest full state, so resync
                    // from there either way.
                    Ok(_) | Err(broadcast::error::RecvError::Lagged(_)) => {
                        if let Some(update) = current_update(&state).await {
                            if send_message(&mut sender, &ServerMessage::Vehicles { update })
                                .await
                                .is_err()
                            {
                                break;
                            }
                        }
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
            message = receiver.next() => {
                match message {
                    Some(Ok(Message::Close(_))) | None => break,
                    // No client protocol beyond keepalive; axum answers pings
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        debug!(error = %e, "WebSocket receive error");
                        break;
                    }
                }
            }
        }
    }
}

async fn current_update(state: &WsState) -> Option<FeedUpdate> {
    let store = state.vehicle_store.read().await;
    store.clone()
}

async fn send_message(
    sender: &mut SplitSink<WebSocket, Message>,
    message: &ServerMessage,
) -> Result<(), axum::Error> {
    let payload = match serde_json::to_string(message) {
        Ok(payload) => payload,
        Err(e) => {
            debug!(error = %e, "Failed to serialize WebSocket message");
            return Ok(());
        }
    };
    sender.send(Message::Text(payload.into())).await
}
