pub mod health;
pub mod vehicles;
pub mod ws;

use axum::{routing::get, Router};

use crate::sync::{VehicleStore, VehicleUpdateSender};

pub fn router(vehicle_store: VehicleStore, vehicle_updates_tx: VehicleUpdateSender) -> Router {
    let ws_state = ws::WsState {
        vehicle_store: vehicle_store.clone(),
        vehicle_updates_tx,
    };

    Router::new()
        .nest("/vehicles", vehicles::router(vehicle_store.clone()))
        .nest("/health", health::router(vehicle_store))
        .route("/ws/vehicles", get(ws::ws_vehicles).with_state(ws_state))
}
