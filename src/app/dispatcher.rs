//! Report delivery with failure isolation.

use std::sync::Arc;

use tracing::{error, info};

use crate::port::Notifier;

/// Hands rendered reports to the notification channel.
///
/// Delivery failures are logged and contained here; they never propagate
/// into the pipeline or the scheduler. `max_attempts` is the retry
/// extension point; the default of 1 performs exactly one attempt.
pub struct Dispatcher {
    notifier: Arc<dyn Notifier>,
    max_attempts: u32,
}

impl Dispatcher {
    #[must_use]
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        Self {
            notifier,
            max_attempts: 1,
        }
    }

    /// Override the delivery attempt budget.
    #[must_use]
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    /// Deliver one report. Returns whether any attempt succeeded.
    pub async fn dispatch(&self, text: &str) -> bool {
        let channel = self.notifier.channel_name();

        for attempt in 1..=self.max_attempts {
            match self.notifier.send(text).await {
                Ok(()) => {
                    info!(channel, "Report delivered");
                    return true;
                }
                Err(err) => {
                    error!(channel, attempt, error = %err, "Report delivery failed");
                }
            }
        }

        false
    }
}
