//! CoinGlass REST client.
//!
//! The aggregator reports funding across many exchanges in one feed;
//! this client keeps only the records of the configured exchange so the
//! rest of the pipeline sees a single-venue snapshot either way.

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client as HttpClient;
use tracing::{debug, warn};

use super::dto::FundingEnvelope;
use crate::config::CoinglassSourceConfig;
use crate::domain::FundingSnapshot;
use crate::error::FetchError;
use crate::port::FundingSource;

const SECRET_HEADER: &str = "coinglassSecret";

pub struct CoinglassClient {
    http: HttpClient,
    base_url: String,
    api_key: String,
    exchange: String,
}

impl CoinglassClient {
    /// Create a client for the given endpoint and exchange filter.
    #[must_use]
    pub fn new(base_url: String, api_key: String, exchange: String, timeout: Duration) -> Self {
        let http = HttpClient::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|err| {
                warn!(error = %err, "Failed to build HTTP client, using defaults");
                HttpClient::new()
            });

        Self {
            http,
            base_url,
            api_key,
            exchange,
        }
    }

    /// Build from config. The API key must already be injected from the
    /// environment (config validation guarantees it at startup).
    #[must_use]
    pub fn from_config(config: &CoinglassSourceConfig) -> Self {
        Self::new(
            config.api_url.clone(),
            config.api_key.clone().unwrap_or_default(),
            config.exchange.clone(),
            Duration::from_secs(config.timeout_secs),
        )
    }
}

#[async_trait]
impl FundingSource for CoinglassClient {
    async fn fetch(&self) -> Result<Vec<FundingSnapshot>, FetchError> {
        let url = format!("{}/public/v2/funding", self.base_url);
        debug!(url = %url, exchange = %self.exchange, "Fetching aggregate funding");

        let response = self
            .http
            .get(&url)
            .header(SECRET_HEADER, &self.api_key)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(FetchError::from)?;
        let response = response.error_for_status().map_err(FetchError::from)?;
        let envelope: FundingEnvelope = response.json().await.map_err(FetchError::from)?;

        let fetched_at = Utc::now();
        let snapshots: Vec<FundingSnapshot> = envelope
            .data
            .into_iter()
            .filter(|row| row.is_exchange(&self.exchange))
            .filter_map(|row| row.into_snapshot(fetched_at))
            .collect();

        debug!(count = snapshots.len(), "Kept exchange records");

        Ok(snapshots)
    }

    fn source_name(&self) -> &'static str {
        "coinglass"
    }
}
