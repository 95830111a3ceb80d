//! Funding data source port.
//!
//! A source produces one fresh batch of per-instrument funding snapshots
//! per call. Implementations bound the call with an HTTP timeout so a
//! pipeline run always terminates.

use async_trait::async_trait;

use crate::domain::FundingSnapshot;
use crate::error::FetchError;

/// Fetches a snapshot of instrument funding data.
///
/// Individual records that cannot be interpreted (missing symbol, missing
/// or non-numeric funding rate) are silently skipped; only total failure
/// of the request or payload is an error.
#[async_trait]
pub trait FundingSource: Send + Sync {
    /// Fetch the current funding snapshot for all instruments.
    async fn fetch(&self) -> Result<Vec<FundingSnapshot>, FetchError>;

    /// Source name for logging/diagnostics.
    fn source_name(&self) -> &'static str;
}
