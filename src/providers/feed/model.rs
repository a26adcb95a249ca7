//! Deserialization targets for the raw feed document.
//!
//! The feed uses compact keys (`sa`/`sd` scheduled arrival/departure,
//! `ra`/`rd` realtime, `a`/`d` delay seconds, `v` track, `hd` heading,
//! `sp` speed in m/s); serde renames map them onto readable field names.
//! Time-of-day fields are `u32` so negative values fail at the parse
//! boundary instead of reaching the pipeline.

use serde::Deserialize;

use super::error::FeedError;

/// One stop of a vehicle's itinerary. Stops arrive ordered by increasing
/// scheduled time.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawStop {
    pub name: String,
    /// Scheduled arrival, seconds since midnight (absent at origin stops)
    #[serde(rename = "sa")]
    pub scheduled_arrival: Option<u32>,
    /// Scheduled departure, seconds since midnight (absent at terminals)
    #[serde(rename = "sd")]
    pub scheduled_departure: Option<u32>,
    /// Predicted/actual arrival, seconds since midnight
    #[serde(rename = "ra")]
    pub realtime_arrival: Option<u32>,
    /// Predicted/actual departure, seconds since midnight
    #[serde(rename = "rd")]
    pub realtime_departure: Option<u32>,
    /// Arrival delay in seconds (negative = early)
    #[serde(rename = "a")]
    pub arrival_delay: Option<i32>,
    /// Departure delay in seconds (negative = early)
    #[serde(rename = "d")]
    pub departure_delay: Option<i32>,
    /// Platform/track label
    #[serde(rename = "v")]
    pub track: Option<String>,
}

impl RawStop {
    /// First non-zero of arrival delay and departure delay, 0 when neither
    /// is set. A zero arrival delay falls through to the departure delay,
    /// matching feeds that only populate one of the two at a stop.
    pub fn effective_delay(&self) -> i32 {
        self.arrival_delay
            .filter(|&d| d != 0)
            .or(self.departure_delay.filter(|&d| d != 0))
            .unwrap_or(0)
    }
}

/// One vehicle with its current position and remaining itinerary.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawVehicle {
    pub lat: f64,
    pub lon: f64,
    pub name: String,
    #[serde(rename = "headsgn")]
    pub headsign: String,
    /// Heading in degrees clockwise from north
    #[serde(rename = "hd", default)]
    pub heading: f64,
    /// Speed in meters per second
    #[serde(rename = "sp", default)]
    pub speed_mps: f64,
    #[serde(default)]
    pub stops: Vec<RawStop>,
}

/// One complete feed snapshot. Superseded wholesale by the next fetch;
/// nothing is merged across snapshots.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawSnapshot {
    /// When the feed producer last refreshed its data (epoch seconds)
    #[serde(rename = "lastUpdated")]
    pub last_updated: i64,
    #[serde(default)]
    pub vehicles: Vec<RawVehicle>,
}

impl RawSnapshot {
    /// Reject documents that parsed but cannot be meaningfully processed.
    pub fn validate(&self) -> Result<(), FeedError> {
        if self.last_updated <= 0 {
            return Err(FeedError::InvalidData(format!(
                "lastUpdated must be a positive epoch timestamp, got {}",
                self.last_updated
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "lastUpdated": 1754550000,
        "vehicles": [
            {
                "lat": 47.5, "lon": 19.05,
                "name": "IC 710", "headsgn": "Szeged",
                "hd": 135.0, "sp": 33.3,
                "stops": [
                    {"name": "Budapest-Nyugati", "sd": 28800, "rd": 28800, "v": "10"},
                    {"name": "Kőbánya-Kispest", "sa": 29100, "sd": 29160,
                     "ra": 29400, "rd": 29460, "a": 300, "d": 300},
                    {"name": "Cegléd", "sa": 31800, "ra": 32100, "a": 300}
                ]
            }
        ]
    }"#;

    #[test]
    fn parses_compact_keys() {
        let snapshot: RawSnapshot = serde_json::from_str(SAMPLE).unwrap();
        assert_eq!(snapshot.last_updated, 1754550000);
        assert_eq!(snapshot.vehicles.len(), 1);

        let vehicle = &snapshot.vehicles[0];
        assert_eq!(vehicle.name, "IC 710");
        assert_eq!(vehicle.headsign, "Szeged");
        assert_eq!(vehicle.heading, 135.0);
        assert_eq!(vehicle.stops.len(), 3);

        let origin = &vehicle.stops[0];
        assert_eq!(origin.scheduled_arrival, None);
        assert_eq!(origin.scheduled_departure, Some(28800));
        assert_eq!(origin.track.as_deref(), Some("10"));

        let terminal = &vehicle.stops[2];
        assert_eq!(terminal.scheduled_departure, None);
        assert_eq!(terminal.arrival_delay, Some(300));
        assert_eq!(terminal.track, None);
    }

    #[test]
    fn absent_optionals_default() {
        let json = r#"{"lastUpdated": 1, "vehicles": [
            {"lat": 1.0, "lon": 2.0, "name": "S50", "headsgn": "X", "stops": []}
        ]}"#;
        let snapshot: RawSnapshot = serde_json::from_str(json).unwrap();
        let vehicle = &snapshot.vehicles[0];
        assert_eq!(vehicle.heading, 0.0);
        assert_eq!(vehicle.speed_mps, 0.0);
        assert!(vehicle.stops.is_empty());
    }

    #[test]
    fn negative_time_of_day_rejected() {
        let json = r#"{"lastUpdated": 1, "vehicles": [
            {"lat": 1.0, "lon": 2.0, "name": "S50", "headsgn": "X",
             "stops": [{"name": "A", "ra": -120}]}
        ]}"#;
        assert!(serde_json::from_str::<RawSnapshot>(json).is_err());
    }

    #[test]
    fn missing_last_updated_rejected() {
        let json = r#"{"vehicles": []}"#;
        assert!(serde_json::from_str::<RawSnapshot>(json).is_err());
    }

    #[test]
    fn non_positive_last_updated_fails_validation() {
        let snapshot: RawSnapshot =
            serde_json::from_str(r#"{"lastUpdated": 0, "vehicles": []}"#).unwrap();
        assert!(matches!(
            snapshot.validate(),
            Err(FeedError::InvalidData(_))
        ));
    }

    #[test]
    fn effective_delay_prefers_nonzero_arrival() {
        let stop: RawStop =
            serde_json::from_str(r#"{"name": "A", "a": 180, "d": 60}"#).unwrap();
        assert_eq!(stop.effective_delay(), 180);
    }

    #[test]
    fn effective_delay_zero_arrival_falls_through() {
        let stop: RawStop =
            serde_json::from_str(r#"{"name": "A", "a": 0, "d": 120}"#).unwrap();
        assert_eq!(stop.effective_delay(), 120);
    }

    #[test]
    fn effective_delay_defaults_to_zero() {
        let stop: RawStop = serde_json::from_str(r#"{"name": "A"}"#).unwrap();
        assert_eq!(stop.effective_delay(), 0);
    }
}
