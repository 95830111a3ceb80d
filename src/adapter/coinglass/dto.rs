//! Wire types for the aggregator funding endpoint.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;

use crate::adapter::decimal_field;
use crate::domain::FundingSnapshot;

/// Response envelope; the records live under `data`.
#[derive(Debug, Deserialize)]
pub struct FundingEnvelope {
    #[serde(default)]
    pub data: Vec<FundingRow>,
}

/// One exchange/instrument record from the aggregate feed.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FundingRow {
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub exchange_name: Option<String>,
    #[serde(default)]
    pub funding_rate: Value,
    #[serde(default)]
    pub price: Value,
}

impl FundingRow {
    /// True when the record belongs to the given exchange.
    #[must_use]
    pub fn is_exchange(&self, exchange: &str) -> bool {
        self.exchange_name
            .as_deref()
            .is_some_and(|name| name.eq_ignore_ascii_case(exchange))
    }

    /// Convert into a snapshot, or `None` when the row lacks a symbol or
    /// a numeric funding rate. The feed carries no per-record timestamp,
    /// so the fetch instant is used.
    pub fn into_snapshot(self, fetched_at: DateTime<Utc>) -> Option<FundingSnapshot> {
        let symbol = self.symbol?;
        let funding_rate = decimal_field(&self.funding_rate)?;
        let mark_price = decimal_field(&self.price).unwrap_or(Decimal::ZERO);

        Some(FundingSnapshot {
            symbol,
            funding_rate,
            mark_price,
            observed_at: fetched_at,
        })
    }
}
