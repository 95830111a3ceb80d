//! Per-instrument funding observation.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// A single instrument's funding state as observed at one fetch.
///
/// Produced fresh each fetch cycle and discarded after formatting;
/// nothing outlives the pipeline run that created it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FundingSnapshot {
    /// Instrument symbol, e.g. `BTCUSDT`.
    pub symbol: String,
    /// Funding rate as a fraction (not a percentage).
    pub funding_rate: Decimal,
    /// Mark price; zero when the source omits it.
    pub mark_price: Decimal,
    /// Source-side observation time, or the fetch instant if absent.
    pub observed_at: DateTime<Utc>,
}

impl FundingSnapshot {
    #[must_use]
    pub fn new(
        symbol: impl Into<String>,
        funding_rate: Decimal,
        mark_price: Decimal,
        observed_at: DateTime<Utc>,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            funding_rate,
            mark_price,
            observed_at,
        }
    }
}
