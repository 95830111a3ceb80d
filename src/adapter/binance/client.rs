//! Binance futures REST client.

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client as HttpClient;
use tracing::{debug, warn};

use super::dto::PremiumIndexRow;
use crate::config::BinanceSourceConfig;
use crate::domain::FundingSnapshot;
use crate::error::FetchError;
use crate::port::FundingSource;

/// HTTP client for the Binance USDⓈ-M futures REST API.
///
/// Funding data comes from the premium index endpoint, which reports the
/// last funding rate and mark price for every perpetual instrument in a
/// single call.
pub struct BinanceFuturesClient {
    http: HttpClient,
    base_url: String,
}

impl BinanceFuturesClient {
    /// Create a client with the given base URL and request timeout.
    #[must_use]
    pub fn new(base_url: String, timeout: Duration) -> Self {
        let http = HttpClient::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|err| {
                warn!(error = %err, "Failed to build HTTP client, using defaults");
                HttpClient::new()
            });

        Self { http, base_url }
    }

    #[must_use]
    pub fn from_config(config: &BinanceSourceConfig) -> Self {
        Self::new(
            config.api_url.clone(),
            Duration::from_secs(config.timeout_secs),
        )
    }
}

#[async_trait]
impl FundingSource for BinanceFuturesClient {
    async fn fetch(&self) -> Result<Vec<FundingSnapshot>, FetchError> {
        let url = format!("{}/fapi/v1/premiumIndex", self.base_url);
        debug!(url = %url, "Fetching premium index");

        let response = self.http.get(&url).send().await.map_err(FetchError::from)?;
        let response = response.error_for_status().map_err(FetchError::from)?;
        let rows: Vec<PremiumIndexRow> = response.json().await.map_err(FetchError::from)?;

        let total = rows.len();
        let fetched_at = Utc::now();
        let snapshots: Vec<FundingSnapshot> = rows
            .into_iter()
            .filter_map(|row| row.into_snapshot(fetched_at))
            .collect();

        if snapshots.len() < total {
            debug!(
                skipped = total - snapshots.len(),
                "Skipped rows without a usable funding rate"
            );
        }

        Ok(snapshots)
    }

    fn source_name(&self) -> &'static str {
        "binance"
    }
}
