//! The fetch → rank → classify → format → deliver pipeline.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use super::dispatcher::Dispatcher;
use super::format;
use crate::domain::{rank, AlertThresholds, Report};
use crate::port::FundingSource;

/// Outcome of one pipeline run.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    /// The dispatched text (report or fetch-failure message).
    pub text: String,
    /// Whether delivery succeeded.
    pub delivered: bool,
}

/// One pipeline instance, shared between the scheduler and manual triggers.
///
/// Every per-run failure is contained inside `run_once`: a fetch error
/// becomes the dispatched error text, a delivery error is absorbed by the
/// dispatcher. Nothing escapes to the caller.
pub struct Pipeline {
    source: Arc<dyn FundingSource>,
    thresholds: AlertThresholds,
    dispatcher: Dispatcher,
}

impl Pipeline {
    #[must_use]
    pub fn new(
        source: Arc<dyn FundingSource>,
        thresholds: AlertThresholds,
        dispatcher: Dispatcher,
    ) -> Self {
        Self {
            source,
            thresholds,
            dispatcher,
        }
    }

    /// Execute one full run: render the current report and deliver it.
    pub async fn run_once(&self) -> RunOutcome {
        let text = self.render_report(Utc::now()).await;
        let delivered = self.dispatcher.dispatch(&text).await;
        RunOutcome { text, delivered }
    }

    /// Fetch and render without delivering.
    ///
    /// A fetch failure is rendered as the distinct error text rather than
    /// returned as an error.
    pub async fn render_report(&self, generated_at: DateTime<Utc>) -> String {
        match self.source.fetch().await {
            Ok(snapshots) => {
                let total = snapshots.len();
                let ranked = rank(snapshots);
                debug!(
                    source = self.source.source_name(),
                    instruments = total,
                    negative = ranked.len(),
                    "Funding snapshot ranked"
                );
                let report = Report::build(ranked, &self.thresholds, generated_at);
                format::render(&report)
            }
            Err(err) => {
                warn!(
                    source = self.source.source_name(),
                    error = %err,
                    "Funding fetch failed"
                );
                format::render_fetch_failure(&err)
            }
        }
    }
}
