//! Report assembly: top-N truncation and full-sequence alerting.

use chrono::{DateTime, Utc};

use super::alert::{AlertThresholds, AlertTier};
use super::ranking::RankedEntry;

/// Maximum entries shown in the main report body.
pub const TOP_LIMIT: usize = 10;

/// One pipeline run's rendered-report input.
///
/// `alerts` is computed over the FULL ranked sequence, not the truncated
/// `top` list: an entry ranked 11th or lower still appears in `alerts`
/// when its tier is above [`AlertTier::None`].
#[derive(Debug, Clone)]
pub struct Report {
    pub generated_at: DateTime<Utc>,
    /// Up to [`TOP_LIMIT`] most negative entries, ascending by rate.
    pub top: Vec<RankedEntry>,
    /// Tier-flagged entries from the full sequence, ascending by rate.
    pub alerts: Vec<(RankedEntry, AlertTier)>,
}

impl Report {
    /// Assemble a report from a ranked sequence.
    #[must_use]
    pub fn build(
        ranked: Vec<RankedEntry>,
        thresholds: &AlertThresholds,
        generated_at: DateTime<Utc>,
    ) -> Self {
        let alerts = ranked
            .iter()
            .filter_map(|entry| match thresholds.classify(entry.percentage) {
                AlertTier::None => None,
                tier => Some((entry.clone(), tier)),
            })
            .collect();

        let mut top = ranked;
        top.truncate(TOP_LIMIT);

        Self {
            generated_at,
            top,
            alerts,
        }
    }

    /// True when no instrument had negative funding.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.top.is_empty()
    }
}
