use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use utoipa::ToSchema;

use crate::sync::VehicleStore;

#[derive(Clone)]
pub struct HealthState {
    pub vehicle_store: VehicleStore,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Whether the service is running
    pub healthy: bool,
    /// Whether at least one refresh cycle has completed
    pub synced: bool,
    /// Number of vehicles in the current cycle's view-models
    pub vehicle_count: usize,
    /// Feed-embedded timestamp of the current cycle (epoch seconds)
    pub last_updated: Option<i64>,
    /// Feed age at the time of the current cycle, in whole minutes
    pub minutes_since_update: Option<i64>,
    /// Whether the current cycle flagged the feed as critically stale
    pub stale: bool,
}

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/api/health",
    responses(
        (status = 200, description = "Service health status", body = HealthResponse)
    ),
    tag = "health"
)]
pub async fn health_check(State(state): State<HealthState>) -> Json<HealthResponse> {
    let store = state.vehicle_store.read().await;

    let (synced, vehicle_count, last_updated, minutes_since_update, stale) =
        if let Some(update) = store.as_ref() {
            (
                true,
                update.vehicles.len(),
                Some(update.last_updated),
                Some(update.minutes_since_update),
                update.stale_alert.is_some(),
            )
        } else {
            (false, 0, None, None, false)
        };

    Json(HealthResponse {
        healthy: true,
        synced,
        vehicle_count,
        last_updated,
        minutes_since_update,
        stale,
    })
}

pub fn router(vehicle_store: VehicleStore) -> Router {
    let state = HealthState { vehicle_store };
    Router::new()
        .route("/", get(health_check))
        .with_state(state)
}
