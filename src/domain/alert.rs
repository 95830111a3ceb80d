//! Alert tier classification for deeply negative funding.

use rust_decimal::Decimal;

/// Severity tier of a ranked entry.
///
/// Ordered by severity: `None < Warning < Critical`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum AlertTier {
    None,
    Warning,
    Critical,
}

/// Classification thresholds on the percentage scale.
///
/// Construction-time invariant, enforced by config validation:
/// `critical <= warning <= 0`. Classification itself never checks it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlertThresholds {
    /// Percentage at or below which an entry is [`AlertTier::Critical`].
    pub critical: Decimal,
    /// Percentage at or below which an entry is [`AlertTier::Warning`].
    pub warning: Decimal,
}

impl AlertThresholds {
    /// Classify a percentage into a tier. Pure and monotonic: a more
    /// negative percentage never gets a less severe tier.
    #[must_use]
    pub fn classify(&self, percentage: Decimal) -> AlertTier {
        if percentage <= self.critical {
            AlertTier::Critical
        } else if percentage <= self.warning {
            AlertTier::Warning
        } else {
            AlertTier::None
        }
    }
}
