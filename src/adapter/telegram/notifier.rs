//! Telegram report delivery.

use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::ParseMode;

use crate::error::DeliveryError;
use crate::port::Notifier;

/// Sends rendered reports to a single chat.
///
/// Reports carry legacy-Markdown inline emphasis, so messages are sent
/// with [`ParseMode::Markdown`].
pub struct TelegramNotifier {
    bot: Bot,
    chat_id: ChatId,
}

impl TelegramNotifier {
    #[must_use]
    pub fn new(bot_token: &str, chat_id: i64) -> Self {
        Self {
            bot: Bot::new(bot_token),
            chat_id: ChatId(chat_id),
        }
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn send(&self, text: &str) -> Result<(), DeliveryError> {
        self.bot
            .send_message(self.chat_id, text)
            .parse_mode(ParseMode::Markdown)
            .await
            .map_err(|err| DeliveryError::Send(err.to_string()))?;
        Ok(())
    }

    fn channel_name(&self) -> &'static str {
        "telegram"
    }
}
