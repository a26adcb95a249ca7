//! Staleness detection for feed snapshots.
//!
//! Freshness is judged against the feed's embedded `lastUpdated` timestamp,
//! never against fetch latency: a snapshot counts as stale only after a
//! successful fetch returned old data.

/// Seconds since the feed's last update after which one forced
/// (cache-bypassing) refetch is warranted.
pub const RETRY_AFTER_SECS: i64 = 50;

/// Seconds since the feed's last update after which users must be warned.
pub const CRITICAL_AFTER_SECS: i64 = 600;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Snapshot is recent enough for normal processing.
    Fresh,
    /// Snapshot is stale and no bypass refetch has happened this cycle yet.
    StaleRetry,
    /// Snapshot is over ten minutes old. Processing continues with the
    /// stale data, but the cycle output carries a blocking user warning.
    StaleCritical,
}

/// Classify a snapshot's age. Rules are checked in order: the critical
/// threshold fires regardless of retry state, so a still-very-stale
/// snapshot obtained from the bypass refetch warns instead of looping.
pub fn assess(seconds_since_update: i64, already_retried: bool) -> Verdict {
    if seconds_since_update > CRITICAL_AFTER_SECS {
        Verdict::StaleCritical
    } else if seconds_since_update > RETRY_AFTER_SECS && !already_retried {
        Verdict::StaleRetry
    } else {
        Verdict::Fresh
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recent_snapshot_is_fresh() {
        assert_eq!(assess(30, false), Verdict::Fresh);
        assert_eq!(assess(0, false), Verdict::Fresh);
    }

    #[test]
    fn stale_snapshot_triggers_one_retry() {
        assert_eq!(assess(55, false), Verdict::StaleRetry);
    }

    #[test]
    fn stale_snapshot_after_retry_passes_through() {
        assert_eq!(assess(55, true), Verdict::Fresh);
    }

    #[test]
    fn very_stale_snapshot_is_critical() {
        assert_eq!(assess(700, false), Verdict::StaleCritical);
    }

    #[test]
    fn critical_wins_over_retry_even_after_bypass() {
        assert_eq!(assess(700, true), Verdict::StaleCritical);
    }

    #[test]
    fn thresholds_are_exclusive_bounds() {
        assert_eq!(assess(RETRY_AFTER_SECS, false), Verdict::Fresh);
        assert_eq!(assess(RETRY_AFTER_SECS + 1, false), Verdict::StaleRetry);
        assert_eq!(assess(CRITICAL_AFTER_SECS, false), Verdict::StaleRetry);
        assert_eq!(assess(CRITICAL_AFTER_SECS + 1, false), Verdict::StaleCritical);
    }
}
