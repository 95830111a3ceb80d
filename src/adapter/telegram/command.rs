//! Telegram command parsing.

/// Supported bot commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TelegramCommand {
    /// Identify: reply with the chat id for configuration display.
    Start,
    Help,
    /// Request an out-of-band funding report.
    Report,
}

/// Parse error for Telegram command messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandParseError {
    NotACommand,
    UnknownCommand(String),
}

impl std::fmt::Display for CommandParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotACommand => write!(f, "message is not a command"),
            Self::UnknownCommand(cmd) => write!(f, "unknown command `{cmd}`"),
        }
    }
}

impl std::error::Error for CommandParseError {}

/// Parse a Telegram message into a bot command.
pub fn parse_command(text: &str) -> Result<TelegramCommand, CommandParseError> {
    let mut parts = text.split_whitespace();
    let Some(raw_command) = parts.next() else {
        return Err(CommandParseError::NotACommand);
    };
    if !raw_command.starts_with('/') {
        return Err(CommandParseError::NotACommand);
    }

    let command = raw_command
        .split_once('@')
        .map_or(raw_command, |(head, _)| head);

    match command {
        "/start" => Ok(TelegramCommand::Start),
        "/help" => Ok(TelegramCommand::Help),
        "/report" => Ok(TelegramCommand::Report),
        other => Err(CommandParseError::UnknownCommand(other.to_string())),
    }
}

/// Help text returned by `/help`.
#[must_use]
pub const fn command_help() -> &'static str {
    "📋 Commands\n\n\
    /report - 📊 Send the funding report now\n\
    /start - 🆔 Show this chat's id\n\
    /help - Show all commands"
}

/// Bot commands for Telegram menu registration.
///
/// Returns tuples of (command, description) for `set_my_commands`.
#[must_use]
pub fn bot_commands() -> Vec<(&'static str, &'static str)> {
    vec![
        ("report", "Send the funding report now"),
        ("start", "Show this chat's id"),
        ("help", "Show all commands"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_known_commands() {
        assert_eq!(parse_command("/start").unwrap(), TelegramCommand::Start);
        assert_eq!(parse_command("/help").unwrap(), TelegramCommand::Help);
        assert_eq!(parse_command("/report").unwrap(), TelegramCommand::Report);
    }

    #[test]
    fn parse_command_with_bot_mention() {
        assert_eq!(
            parse_command("/report@fundwatch_bot").unwrap(),
            TelegramCommand::Report
        );
    }

    #[test]
    fn parse_command_with_surrounding_whitespace() {
        assert_eq!(
            parse_command("  /report  ").unwrap(),
            TelegramCommand::Report
        );
    }

    #[test]
    fn parse_not_a_command() {
        assert!(matches!(
            parse_command("hello"),
            Err(CommandParseError::NotACommand)
        ));
        assert!(matches!(
            parse_command(""),
            Err(CommandParseError::NotACommand)
        ));
    }

    #[test]
    fn parse_unknown_command() {
        let err = parse_command("/funding").unwrap_err();
        assert!(matches!(err, CommandParseError::UnknownCommand(ref cmd) if cmd == "/funding"));
    }

    #[test]
    fn commands_are_case_sensitive() {
        assert!(matches!(
            parse_command("/REPORT"),
            Err(CommandParseError::UnknownCommand(_))
        ));
    }

    #[test]
    fn bot_commands_match_help() {
        let help = command_help();
        for (cmd, desc) in bot_commands() {
            assert!(help.contains(&format!("/{cmd}")), "missing /{cmd} in help");
            assert!(!desc.is_empty());
        }
    }
}
