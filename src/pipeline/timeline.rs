//! Stop-sequence traversal: which delay applies right now, and how each
//! stop row renders.

use crate::providers::feed::RawStop;

/// Render flags for one stop row. Both predicates are evaluated per stop,
/// independent of neighbors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StopState {
    /// The vehicle has already departed this stop
    pub passed: bool,
    /// Either delay at this stop is positive
    pub delayed: bool,
}

/// Delay applying to the vehicle right now, in seconds.
///
/// Forward scan with early exit: the first stop whose realtime arrival is
/// known and lies after `now_secs` (the upcoming or in-progress stop)
/// contributes its effective delay. Past the last known arrival the last
/// stop's delay applies; an empty sequence yields 0. Stateless: the feed
/// carries server-side projected realtime data, so this is re-derived on
/// every call.
pub fn current_delay_seconds(stops: &[RawStop], now_secs: u32) -> i32 {
    for stop in stops {
        if let Some(arrival) = stop.realtime_arrival {
            if arrival > now_secs {
                return stop.effective_delay();
            }
        }
    }
    stops.last().map(RawStop::effective_delay).unwrap_or(0)
}

pub fn stop_state(stop: &RawStop, now_secs: u32) -> StopState {
    StopState {
        passed: stop.realtime_departure.unwrap_or(0) < now_secs,
        delayed: stop.arrival_delay.unwrap_or(0) > 0 || stop.departure_delay.unwrap_or(0) > 0,
    }
}
