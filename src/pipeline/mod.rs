//! The per-cycle computation: one raw feed snapshot plus one reference
//! instant in, one complete view-model set out.
//!
//! Everything here is pure; the sync manager owns fetching, retrying and
//! store replacement. Identical inputs produce equal output, so re-running
//! a cycle on an unchanged snapshot is a no-op for clients.

pub mod clock;
pub mod delay;
pub mod freshness;
pub mod timeline;

use chrono::{DateTime, TimeZone, Utc};
use chrono_tz::Tz;
use tracing::warn;

use crate::providers::feed::{RawSnapshot, RawVehicle};
use crate::sync::types::{FeedUpdate, StopRow, VehicleView};

use delay::DelayLevel;

/// Result of one refresh cycle, tagged with how fresh the data turned out.
#[derive(Debug, Clone, PartialEq)]
pub enum CycleOutcome {
    /// Snapshot was fresh (possibly after the bypass refetch recovered).
    Fresh(FeedUpdate),
    /// The bypass refetch still returned stale data, below the critical
    /// threshold. No further retries this cycle.
    RetryExhausted(FeedUpdate),
    /// Snapshot is critically stale; the update carries the user-facing
    /// alert and processing continued with the stale data.
    CriticalStale(FeedUpdate),
}

impl CycleOutcome {
    pub fn into_update(self) -> FeedUpdate {
        match self {
            CycleOutcome::Fresh(update)
            | CycleOutcome::RetryExhausted(update)
            | CycleOutcome::CriticalStale(update) => update,
        }
    }
}

/// Build the complete view-model set for one snapshot at one instant.
///
/// `critical` marks the snapshot as critically stale, which sets the
/// blocking alert string on the update.
pub fn build_update(snapshot: &RawSnapshot, now: DateTime<Tz>, critical: bool) -> FeedUpdate {
    let now_secs = clock::seconds_since_midnight(&now);
    let seconds_since_update = now.timestamp() - snapshot.last_updated;
    let minutes_since_update = (seconds_since_update as f64 / 60.0).round() as i64;

    let updated_local = format_updated_at(snapshot.last_updated, now.timezone());
    let freshness_banner = format!(
        "Utolsó frissítés: {}, {} perce",
        updated_local, minutes_since_update
    );
    let stale_alert = critical.then(|| {
        format!(
            "Figyelem! Az adatok utolsó frissítése {}-kor volt!",
            updated_local
        )
    });

    let vehicles = snapshot
        .vehicles
        .iter()
        .filter_map(|vehicle| build_vehicle(vehicle, now_secs))
        .collect();

    FeedUpdate {
        last_updated: snapshot.last_updated,
        minutes_since_update,
        freshness_banner,
        stale_alert,
        vehicles,
    }
}

fn build_vehicle(vehicle: &RawVehicle, now_secs: u32) -> Option<VehicleView> {
    if vehicle.stops.is_empty() {
        warn!(vehicle = %vehicle.name, "Skipping vehicle without stop sequence");
        return None;
    }

    let delay_seconds = timeline::current_delay_seconds(&vehicle.stops, now_secs);
    let delay_minutes = (delay_seconds as f64 / 60.0).round() as i64;
    let level = DelayLevel::from_minutes(delay_minutes);
    let speed_kmh = (vehicle.speed_mps * 3.6).round() as i64;

    let delay_text = if delay_minutes >= 1 {
        format!("{} perc késés", delay_minutes)
    } else {
        "nincs késés".to_string()
    };
    let tooltip = format!("{} ({} km/h) - {}", vehicle.name, speed_kmh, delay_text);

    let stops = vehicle
        .stops
        .iter()
        .map(|stop| {
            let state = timeline::stop_state(stop, now_secs);
            StopRow {
                name: stop.name.clone(),
                scheduled_arrival: clock::format_clock(stop.scheduled_arrival),
                realtime_arrival: clock::format_clock(stop.realtime_arrival),
                scheduled_departure: clock::format_clock(stop.scheduled_departure),
                realtime_departure: clock::format_clock(stop.realtime_departure),
                delayed: state.delayed,
                passed: state.passed,
                track: stop
                    .track
                    .clone()
                    .unwrap_or_else(|| clock::PLACEHOLDER.to_string()),
            }
        })
        .collect();

    Some(VehicleView {
        name: vehicle.name.clone(),
        headsign: vehicle.headsign.clone(),
        lat: vehicle.lat,
        lon: vehicle.lon,
        heading_degrees: vehicle.heading,
        speed_kmh,
        delay_minutes,
        delay_level: level.rank(),
        delay_color: level.color().as_str().to_string(),
        tooltip,
        stops,
    })
}

/// Wall-clock `HH:MM:SS` of the feed's last update in the configured
/// timezone. Epoch values outside chrono's representable range render as
/// a question-mark placeholder rather than failing the cycle.
fn format_updated_at(last_updated: i64, tz: Tz) -> String {
    match Utc.timestamp_opt(last_updated, 0).single() {
        Some(dt) => dt.with_timezone(&tz).format("%H:%M:%S").to_string(),
        None => "??:??:??".to_string(),
    }
}
