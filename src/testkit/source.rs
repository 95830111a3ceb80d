//! Scripted funding sources.

use std::time::Duration;

use async_trait::async_trait;

use crate::domain::FundingSnapshot;
use crate::error::FetchError;
use crate::port::FundingSource;

/// Returns a fixed snapshot batch, optionally after a simulated delay.
pub struct ScriptedSource {
    snapshots: Vec<FundingSnapshot>,
    delay: Option<Duration>,
}

impl ScriptedSource {
    #[must_use]
    pub fn new(snapshots: Vec<FundingSnapshot>) -> Self {
        Self {
            snapshots,
            delay: None,
        }
    }

    /// Simulate a slow fetch; combine with paused-time tests to hold a
    /// pipeline run in flight.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

#[async_trait]
impl FundingSource for ScriptedSource {
    async fn fetch(&self) -> Result<Vec<FundingSnapshot>, FetchError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        Ok(self.snapshots.clone())
    }

    fn source_name(&self) -> &'static str {
        "scripted"
    }
}

/// The failure a [`FailingSource`] produces on every fetch.
#[derive(Debug, Clone, Copy)]
pub enum FailureKind {
    Timeout,
    Transport,
    BadStatus(u16),
    MalformedPayload,
}

/// Always fails with the configured error.
pub struct FailingSource {
    kind: FailureKind,
}

impl FailingSource {
    #[must_use]
    pub fn new(kind: FailureKind) -> Self {
        Self { kind }
    }
}

#[async_trait]
impl FundingSource for FailingSource {
    async fn fetch(&self) -> Result<Vec<FundingSnapshot>, FetchError> {
        Err(match self.kind {
            FailureKind::Timeout => FetchError::Timeout,
            FailureKind::Transport => FetchError::Transport("scripted failure".into()),
            FailureKind::BadStatus(status) => FetchError::BadStatus(status),
            FailureKind::MalformedPayload => {
                FetchError::MalformedPayload("scripted failure".into())
            }
        })
    }

    fn source_name(&self) -> &'static str {
        "failing"
    }
}
