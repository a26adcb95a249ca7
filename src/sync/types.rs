//! Type definitions for the sync module: the per-cycle view-models handed
//! to map clients, the shared store, and the update notification channel.

use serde::Serialize;
use std::sync::Arc;
use tokio::sync::{broadcast, RwLock};
use utoipa::ToSchema;

/// One row of a vehicle's stop table, render-ready.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct StopRow {
    /// Station label
    pub name: String,
    /// Scheduled arrival, formatted `HH:MM` ("-" when unknown)
    pub scheduled_arrival: String,
    /// Realtime arrival, formatted `HH:MM` ("-" when unknown)
    pub realtime_arrival: String,
    /// Scheduled departure, formatted `HH:MM` ("-" when unknown)
    pub scheduled_departure: String,
    /// Realtime departure, formatted `HH:MM` ("-" when unknown)
    pub realtime_departure: String,
    /// Either delay at this stop is positive
    pub delayed: bool,
    /// The vehicle has already departed this stop
    pub passed: bool,
    /// Platform/track label ("-" when not assigned)
    pub track: String,
}

/// Presentation-ready state of one vehicle for one refresh cycle.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct VehicleView {
    pub name: String,
    /// Final destination shown to riders
    pub headsign: String,
    pub lat: f64,
    pub lon: f64,
    /// Heading in degrees clockwise from north
    pub heading_degrees: f64,
    /// Speed rounded to whole km/h
    pub speed_kmh: i64,
    /// Current delay in whole minutes
    pub delay_minutes: i64,
    /// Severity bucket 0–3
    pub delay_level: u8,
    /// Marker color for the severity bucket (lime/yellow/orange/red)
    pub delay_color: String,
    /// Hover text: name, speed and delay
    pub tooltip: String,
    /// Stop table rows in itinerary order
    pub stops: Vec<StopRow>,
}

/// Complete output of one refresh cycle. Replaces the previous cycle's
/// output wholesale; nothing is merged across cycles.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct FeedUpdate {
    /// Feed-embedded update timestamp (epoch seconds)
    pub last_updated: i64,
    /// Whole minutes between the cycle's reference instant and last_updated
    pub minutes_since_update: i64,
    /// Banner line naming the last update time
    pub freshness_banner: String,
    /// Blocking warning, set when the snapshot is critically stale
    pub stale_alert: Option<String>,
    pub vehicles: Vec<VehicleView>,
}

/// Shared store for the current cycle's view-models. `None` until the
/// first cycle completes.
pub type VehicleStore = Arc<RwLock<Option<FeedUpdate>>>;

/// Update notification for vehicle data changes
#[derive(Debug, Clone, Serialize)]
pub struct VehicleUpdate {
    /// Timestamp when this update was generated
    pub timestamp: String,
    /// Whether this is the initial snapshot or an incremental update
    pub is_initial: bool,
}

/// Sender for vehicle update notifications
pub type VehicleUpdateSender = broadcast::Sender<VehicleUpdate>;
