//! HTTP client for the train position feed.
//!
//! Fetches the JSON snapshot resource on demand, optionally forcing cache
//! revalidation for the staleness retry protocol, and validates the parsed
//! document before handing it to the pipeline.

pub mod error;
pub mod model;

use reqwest::header;

use crate::config::FeedConfig;

pub use error::FeedError;
pub use model::{RawSnapshot, RawStop, RawVehicle};

/// Maximum allowed feed response size (10 MB)
const MAX_FEED_SIZE: usize = 10 * 1024 * 1024;

pub struct FeedClient {
    client: reqwest::Client,
    url: String,
}

impl FeedClient {
    pub fn new(config: &FeedConfig) -> Result<Self, FeedError> {
        let client = reqwest::Client::builder()
            .user_agent("vonatradar/0.3 (https://github.com/vonatradar/vonatradar)")
            .timeout(std::time::Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            url: config.url.clone(),
        })
    }

    /// Fetch and parse one feed snapshot.
    ///
    /// With `cache_bypass` the request carries `Cache-Control: no-cache`,
    /// forcing intermediaries to revalidate instead of serving a cached
    /// copy. The freshness guard requests this exactly once per cycle.
    pub async fn fetch_snapshot(&self, cache_bypass: bool) -> Result<RawSnapshot, FeedError> {
        let mut request = self.client.get(&self.url);
        if cache_bypass {
            request = request
                .header(header::CACHE_CONTROL, "no-cache")
                .header(header::PRAGMA, "no-cache");
        }

        let response = request.send().await?;

        if !response.status().is_success() {
            return Err(FeedError::Status(response.status()));
        }

        let bytes = response.bytes().await?;

        if bytes.len() > MAX_FEED_SIZE {
            return Err(FeedError::InvalidData(format!(
                "feed response too large: {} bytes (max {} bytes)",
                bytes.len(),
                MAX_FEED_SIZE
            )));
        }

        let snapshot: RawSnapshot = serde_json::from_slice(&bytes)?;
        snapshot.validate()?;

        Ok(snapshot)
    }
}
