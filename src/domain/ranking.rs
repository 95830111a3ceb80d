//! Negative-funding selection and deterministic ordering.

use rust_decimal::Decimal;

use super::snapshot::FundingSnapshot;

/// A snapshot admitted into the ranked sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedEntry {
    pub snapshot: FundingSnapshot,
    /// Funding rate on the percentage scale (`funding_rate * 100`).
    pub percentage: Decimal,
    /// 1-based rank, most negative first.
    pub position: usize,
}

impl RankedEntry {
    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.snapshot.symbol
    }
}

/// Select negative-funding snapshots and order them deterministically.
///
/// Sorted ascending by funding rate (most negative first); ties broken by
/// symbol lexical order so identical inputs always produce identical
/// sequences. Entries with `funding_rate >= 0` are excluded. An empty
/// result is a valid state, not an error.
#[must_use]
pub fn rank(snapshots: Vec<FundingSnapshot>) -> Vec<RankedEntry> {
    let mut negative: Vec<FundingSnapshot> = snapshots
        .into_iter()
        .filter(|snapshot| snapshot.funding_rate < Decimal::ZERO)
        .collect();

    negative.sort_by(|a, b| {
        a.funding_rate
            .cmp(&b.funding_rate)
            .then_with(|| a.symbol.cmp(&b.symbol))
    });

    negative
        .into_iter()
        .enumerate()
        .map(|(index, snapshot)| RankedEntry {
            percentage: snapshot.funding_rate * Decimal::ONE_HUNDRED,
            position: index + 1,
            snapshot,
        })
        .collect()
}
