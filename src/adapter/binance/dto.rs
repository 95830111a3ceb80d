//! Wire types for the premium index endpoint.
//!
//! Rate and price fields arrive as strings on this API but are accepted
//! as numbers too; unknown fields are ignored. A row that cannot yield a
//! symbol and a numeric funding rate is skipped, never an error.

use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;

use crate::adapter::decimal_field;
use crate::domain::FundingSnapshot;

/// One instrument's row in the premium index payload.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PremiumIndexRow {
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub last_funding_rate: Value,
    #[serde(default)]
    pub mark_price: Value,
    /// Server timestamp in epoch milliseconds.
    #[serde(default)]
    pub time: Option<i64>,
}

impl PremiumIndexRow {
    /// Convert into a snapshot, or `None` when the row lacks a symbol or
    /// a numeric funding rate. Mark price defaults to zero when absent.
    pub fn into_snapshot(self, fetched_at: DateTime<Utc>) -> Option<FundingSnapshot> {
        let symbol = self.symbol?;
        let funding_rate = decimal_field(&self.last_funding_rate)?;
        let mark_price = decimal_field(&self.mark_price).unwrap_or(Decimal::ZERO);
        let observed_at = self
            .time
            .and_then(|ms| Utc.timestamp_millis_opt(ms).single())
            .unwrap_or(fetched_at);

        Some(FundingSnapshot {
            symbol,
            funding_rate,
            mark_price,
            observed_at,
        })
    }
}
