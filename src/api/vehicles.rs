use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use utoipa::ToSchema;

use crate::sync::{FeedUpdate, VehicleStore};

#[derive(Clone)]
pub struct VehiclesState {
    pub vehicle_store: VehicleStore,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct VehicleListResponse {
    /// Whether a refresh cycle has completed since startup
    pub synced: bool,
    /// Latest cycle output; null until the first cycle completes
    pub update: Option<FeedUpdate>,
}

/// Get the latest refresh cycle's vehicle view-models
#[utoipa::path(
    get,
    path = "/api/vehicles",
    responses(
        (status = 200, description = "Latest refresh cycle output", body = VehicleListResponse)
    ),
    tag = "vehicles"
)]
pub async fn list_vehicles(State(state): State<VehiclesState>) -> Json<VehicleListResponse> {
    let store = state.vehicle_store.read().await;

    Json(VehicleListResponse {
        synced: store.is_some(),
        update: store.clone(),
    })
}

pub fn router(vehicle_store: VehicleStore) -> Router {
    let state = VehiclesState { vehicle_store };
    Router::new()
        .route("/", get(list_vehicles))
        .with_state(state)
}
