//! Notifier port for report delivery.

use async_trait::async_trait;
use tracing::info;

use crate::error::DeliveryError;

/// Delivery channel for rendered reports.
///
/// The text may carry lightweight inline markup (`*bold*`, `` `code` ``);
/// implementations translate or strip it as their channel requires.
///
/// Implementations must be thread-safe (`Send + Sync`).
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver one report to the configured destination.
    async fn send(&self, text: &str) -> Result<(), DeliveryError>;

    /// Channel name for logging/diagnostics.
    fn channel_name(&self) -> &'static str;
}

/// A no-op notifier for tests or when delivery is disabled.
pub struct NullNotifier;

#[async_trait]
impl Notifier for NullNotifier {
    async fn send(&self, _text: &str) -> Result<(), DeliveryError> {
        Ok(())
    }

    fn channel_name(&self) -> &'static str {
        "null"
    }
}

/// A notifier that logs reports via tracing instead of delivering them.
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn send(&self, text: &str) -> Result<(), DeliveryError> {
        info!(chars = text.len(), "Report generated:\n{text}");
        Ok(())
    }

    fn channel_name(&self) -> &'static str {
        "log"
    }
}
