//! Background synchronization of the train position feed.
//!
//! One task runs the refresh loop: fetch → freshness check → at most one
//! cache-bypass refetch → view-model assembly → wholesale store
//! replacement → client notification. Cycles are serialized on that task,
//! so a slow retry can never overlap the next scheduled fetch.

pub mod types;

pub use types::{FeedUpdate, StopRow, VehicleStore, VehicleUpdate, VehicleUpdateSender, VehicleView};

use std::sync::Arc;

use chrono::Utc;
use chrono_tz::Tz;
use tokio::sync::{broadcast, RwLock};
use tracing::{error, info, warn};

use crate::config::Config;
use crate::pipeline::{self, freshness, CycleOutcome};
use crate::providers::feed::{FeedClient, FeedError};

/// Owns the feed client, the current view-model set and the refresh loop.
pub struct SyncManager {
    feed_client: FeedClient,
    interval_secs: u64,
    timezone: Tz,
    vehicles: VehicleStore,
    vehicle_updates_tx: VehicleUpdateSender,
}

impl SyncManager {
    pub fn new(config: &Config) -> Result<Self, FeedError> {
        let feed_client = FeedClient::new(&config.feed)?;

        // Create broadcast channel for vehicle updates (capacity 16 - clients
        // will get the latest full state from the store anyway)
        let (vehicle_updates_tx, _) = broadcast::channel(16);

        Ok(Self {
            feed_client,
            interval_secs: config.feed.interval_secs,
            timezone: config.feed.parsed_timezone(),
            vehicles: Arc::new(RwLock::new(None)),
            vehicle_updates_tx,
        })
    }

    /// Get a reference to the view-model store for API access
    pub fn vehicle_store(&self) -> VehicleStore {
        self.vehicles.clone()
    }

    /// Get the vehicle updates sender for passing to API handlers
    pub fn vehicle_updates_sender(&self) -> VehicleUpdateSender {
        self.vehicle_updates_tx.clone()
    }

    /// Run the refresh loop forever.
    pub async fn start(self: Arc<Self>) {
        info!(
            interval_secs = self.interval_secs,
            timezone = %self.timezone,
            "Starting feed sync loop"
        );

        let mut interval =
            tokio::time::interval(tokio::time::Duration::from_secs(self.interval_secs));

        loop {
            interval.tick().await;
            self.run_cycle().await;
        }
    }

    /// One scheduled cycle. Errors leave the previous cycle's view-models
    /// in place; the next tick retries naturally.
    async fn run_cycle(&self) {
        match self.refresh().await {
            Ok(outcome) => {
                match &outcome {
                    CycleOutcome::Fresh(_) => {}
                    CycleOutcome::RetryExhausted(update) => warn!(
                        minutes_since_update = update.minutes_since_update,
                        "Feed still stale after cache-bypass refetch"
                    ),
                    CycleOutcome::CriticalStale(update) => warn!(
                        minutes_since_update = update.minutes_since_update,
                        "Feed critically stale, surfacing user warning"
                    ),
                }

                let update = outcome.into_update();
                info!(
                    vehicles = update.vehicles.len(),
                    minutes_since_update = update.minutes_since_update,
                    "Refresh cycle complete"
                );

                {
                    let mut store = self.vehicles.write().await;
                    *store = Some(update);
                }

                let notification = VehicleUpdate {
                    timestamp: Utc::now().to_rfc3339(),
                    is_initial: false,
                };
                // Ignore send errors - they just mean no one is listening
                let _ = self.vehicle_updates_tx.send(notification);
            }
            Err(e) => {
                error!(error = %e, "Refresh cycle failed, keeping last known data");
            }
        }
    }

    /// Fetch a snapshot and classify it, refetching once with cache bypass
    /// when the feed looks stale. Bounded: the `already_retried` flag
    /// permits exactly one extra fetch per cycle.
    async fn refresh(&self) -> Result<CycleOutcome, FeedError> {
        let mut already_retried = false;

        loop {
            let snapshot = self.feed_client.fetch_snapshot(already_retried).await?;

            let now = Utc::now().with_timezone(&self.timezone);
            let seconds_since_update = now.timestamp() - snapshot.last_updated;
            info!(
                seconds_since_update,
                minutes_since_update = (seconds_since_update as f64 / 60.0).round() as i64,
                already_retried,
                "Fetched feed snapshot"
            );

            match freshness::assess(seconds_since_update, already_retried) {
                freshness::Verdict::StaleRetry => {
                    warn!(
                        seconds_since_update,
                        "Feed stale, refetching with cache bypass"
                    );
                    already_retried = true;
                }
                freshness::Verdict::Fresh => {
                    let update = pipeline::build_update(&snapshot, now, false);
                    let outcome =
                        if already_retried && seconds_since_update > freshness::RETRY_AFTER_SECS {
                            CycleOutcome::RetryExhausted(update)
                        } else {
                            CycleOutcome::Fresh(update)
                        };
                    return Ok(outcome);
                }
                freshness::Verdict::StaleCritical => {
                    let update = pipeline::build_update(&snapshot, now, true);
                    return Ok(CycleOutcome::CriticalStale(update));
                }
            }
        }
    }
}
