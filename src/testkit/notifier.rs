//! Recording delivery channel.

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::error::DeliveryError;
use crate::port::Notifier;

/// Captures dispatched texts; optionally fails every send.
#[derive(Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<String>>,
    attempts: Mutex<u32>,
    fail: bool,
}

impl RecordingNotifier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A notifier whose every send fails after being recorded as an
    /// attempt.
    #[must_use]
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Successfully delivered texts, in order.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().clone()
    }

    /// Total send attempts, including failed ones.
    #[must_use]
    pub fn attempts(&self) -> u32 {
        *self.attempts.lock()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send(&self, text: &str) -> Result<(), DeliveryError> {
        *self.attempts.lock() += 1;
        if self.fail {
            return Err(DeliveryError::Send("scripted failure".into()));
        }
        self.messages.lock().push(text.to_string());
        Ok(())
    }

    fn channel_name(&self) -> &'static str {
        "recording"
    }
}
