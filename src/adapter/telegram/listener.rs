//! Inbound Telegram command handling.
//!
//! A thin trigger layer: commands either identify the chat or request a
//! pipeline run through the scheduler's manual trigger, so the
//! one-run-at-a-time rule has a single enforcement point.

use teloxide::prelude::*;
use teloxide::types::BotCommand;
use tracing::{error, info, warn};

use super::command::{bot_commands, command_help, parse_command, TelegramCommand};
use crate::app::ManualTrigger;

/// Settings for the command listener.
#[derive(Debug, Clone)]
pub struct ListenerConfig {
    pub bot_token: String,
    /// Chat allowed to issue commands (besides `/start`, which answers
    /// anywhere so operators can discover a chat's id).
    pub chat_id: i64,
}

/// Run the long-polling command listener until the process shuts down.
pub async fn command_listener(config: ListenerConfig, trigger: ManualTrigger) {
    let bot = Bot::new(&config.bot_token);
    let allowed_chat = ChatId(config.chat_id);

    // Register commands with Telegram so they appear in the "/" menu
    if let Err(e) = register_bot_commands(&bot).await {
        warn!(error = %e, "Failed to register bot commands with Telegram");
    }

    info!(chat_id = config.chat_id, "Telegram command listener started");

    teloxide::repl(bot, move |bot: Bot, msg: Message| {
        let trigger = trigger.clone();
        async move {
            let Some(text) = msg.text() else {
                return respond(());
            };

            if let Some(reply) = command_response(text, msg.chat.id, allowed_chat, &trigger) {
                if let Err(e) = bot.send_message(msg.chat.id, reply).await {
                    error!(error = %e, "Failed to send Telegram command response");
                }
            }

            respond(())
        }
    })
    .await;
}

/// Compute the reply for an inbound message, or `None` to stay silent.
fn command_response(
    text: &str,
    chat: ChatId,
    allowed_chat: ChatId,
    trigger: &ManualTrigger,
) -> Option<String> {
    let command = parse_command(text).ok()?;

    if chat != allowed_chat && command != TelegramCommand::Start {
        return None;
    }

    match command {
        TelegramCommand::Start => Some(format!(
            "Bot is running.\nChat ID: {}\nUse this chat_id in the configuration if needed.",
            chat.0
        )),
        TelegramCommand::Help => Some(command_help().to_string()),
        TelegramCommand::Report => {
            if trigger.request() {
                Some("Funding report requested.".to_string())
            } else {
                Some("Scheduler is not running.".to_string())
            }
        }
    }
}

/// Register bot commands with Telegram for the "/" menu.
async fn register_bot_commands(bot: &Bot) -> Result<(), teloxide::RequestError> {
    let commands: Vec<BotCommand> = bot_commands()
        .into_iter()
        .map(|(cmd, desc)| BotCommand::new(cmd, desc))
        .collect();

    bot.set_my_commands(commands).await?;
    info!("Registered bot commands with Telegram");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{Dispatcher, Pipeline, Scheduler};
    use crate::domain::AlertThresholds;
    use crate::testkit::{RecordingNotifier, ScriptedSource};
    use rust_decimal_macros::dec;
    use std::sync::Arc;
    use std::time::Duration;

    fn spawn_trigger() -> (crate::app::SchedulerHandle, ManualTrigger) {
        let pipeline = Arc::new(Pipeline::new(
            Arc::new(ScriptedSource::new(vec![])),
            AlertThresholds {
                critical: dec!(-0.3),
                warning: dec!(-0.1),
            },
            Dispatcher::new(Arc::new(RecordingNotifier::new())),
        ));
        let handle = Scheduler::new(
            pipeline,
            Duration::from_secs(3600),
            Duration::from_secs(3600),
        )
        .spawn();
        let trigger = handle.manual_trigger();
        (handle, trigger)
    }

    #[tokio::test]
    async fn start_replies_with_chat_id_anywhere() {
        let (_handle, trigger) = spawn_trigger();
        let reply = command_response("/start", ChatId(42), ChatId(7), &trigger).unwrap();
        assert!(reply.contains("42"));
    }

    #[tokio::test]
    async fn other_commands_ignored_outside_allowed_chat() {
        let (_handle, trigger) = spawn_trigger();
        assert!(command_response("/report", ChatId(42), ChatId(7), &trigger).is_none());
        assert!(command_response("/help", ChatId(42), ChatId(7), &trigger).is_none());
    }

    #[tokio::test]
    async fn report_acknowledges_request() {
        let (_handle, trigger) = spawn_trigger();
        let reply = command_response("/report", ChatId(7), ChatId(7), &trigger).unwrap();
        assert_eq!(reply, "Funding report requested.");
    }

    #[tokio::test]
    async fn report_after_stop_reports_scheduler_down() {
        let (handle, trigger) = spawn_trigger();
        handle.stop();
        handle.join().await;

        let reply = command_response("/report", ChatId(7), ChatId(7), &trigger).unwrap();
        assert_eq!(reply, "Scheduler is not running.");
    }

    #[tokio::test]
    async fn non_commands_stay_silent() {
        let (_handle, trigger) = spawn_trigger();
        assert!(command_response("gm", ChatId(7), ChatId(7), &trigger).is_none());
    }
}
