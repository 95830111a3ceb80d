//! Telegram delivery and bot commands.
//!
//! Requires the `telegram` feature to be enabled.

mod command;
mod listener;
mod notifier;

pub use command::{bot_commands, command_help, parse_command, CommandParseError, TelegramCommand};
pub use listener::{command_listener, ListenerConfig};
pub use notifier::TelegramNotifier;
