//! Conversions between feed times (seconds since local midnight) and
//! render-ready clock strings.

use chrono::{DateTime, TimeZone, Timelike};

/// Placeholder rendered for absent times and track labels.
pub const PLACEHOLDER: &str = "-";

/// Local wall-clock seconds since midnight for the given instant.
pub fn seconds_since_midnight<Tz: TimeZone>(dt: &DateTime<Tz>) -> u32 {
    dt.num_seconds_from_midnight()
}

/// Format a seconds-since-midnight value as zero-padded `HH:MM`.
///
/// Values of 24 hours and above wrap to the next day (25:00 renders as
/// 01:00), the way timetables encode past-midnight stops of a service day.
/// `None` renders as the placeholder.
pub fn format_clock(secs: Option<u32>) -> String {
    match secs {
        None => PLACEHOLDER.to_string(),
        Some(secs) => {
            let hours = (secs / 3600) % 24;
            let minutes = (secs % 3600) / 60;
            format!("{:02}:{:02}", hours, minutes)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use chrono_tz::Europe::Budapest;

    #[test]
    fn absent_time_renders_placeholder() {
        assert_eq!(format_clock(None), "-");
    }

    #[test]
    fn midnight_is_zero_padded() {
        assert_eq!(format_clock(Some(0)), "00:00");
    }

    #[test]
    fn seconds_component_is_truncated() {
        assert_eq!(format_clock(Some(3661)), "01:01");
    }

    #[test]
    fn next_day_times_roll_over() {
        // 25:00 on the service day is 01:00 on the wall clock
        assert_eq!(format_clock(Some(90000)), "01:00");
        assert_eq!(format_clock(Some(86400)), "00:00");
    }

    #[test]
    fn late_evening_formats() {
        assert_eq!(format_clock(Some(86340)), "23:59");
    }

    #[test]
    fn seconds_since_midnight_uses_local_time() {
        // 2026-07-15 06:30:00 UTC is 08:30:00 in Budapest (CEST)
        let dt = Utc
            .with_ymd_and_hms(2026, 7, 15, 6, 30, 0)
            .unwrap()
            .with_timezone(&Budapest);
        assert_eq!(seconds_since_midnight(&dt), 8 * 3600 + 30 * 60);
    }
}
