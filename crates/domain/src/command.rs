//! Chat commands understood by the bot.
//!
//! Text is expected in the usual bot form: `/name[@botname] [args…]`.
//! Anything that does not start with `/` or names an unknown command is not a
//! command and parses to `None`. In group chats a command may be addressed to
//! another bot; [`Command::parse_for`] drops those.

/// A recognised chat command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Start,
    Help,
    Status,
    Toggle,
    /// `/auto_start [minutes]`; the raw argument is validated later so the
    /// user gets a specific error message.
    AutoStart(Option<String>),
    AutoStop,
}

impl Command {
    /// Parse a chat message into a command, accepting any `@botname` suffix.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        Self::parse_for(text, None)
    }

    /// Parse a chat message sent to the bot named `bot_username`.
    ///
    /// A command carrying a mention of a different bot is not for us and
    /// parses to `None`. The comparison ignores ASCII case and a leading `@`.
    #[must_use]
    pub fn parse_for(text: &str, bot_username: Option<&str>) -> Option<Self> {
        let mut words = text.split_whitespace();
        let head = words.next()?.strip_prefix('/')?;
        let (name, mention) = match head.split_once('@') {
            Some((name, mention)) => (name, Some(mention)),
            None => (head, None),
        };
        if name.is_empty() {
            return None;
        }
        if let (Some(mention), Some(own)) = (mention, bot_username) {
            if !mention.eq_ignore_ascii_case(own.trim_start_matches('@')) {
                return None;
            }
        }

        let command = match name.to_ascii_lowercase().as_str() {
            "start" => Self::Start,
            "help" => Self::Help,
            "status" => Self::Status,
            "toggle" => Self::Toggle,
            "auto_start" => Self::AutoStart(words.next().map(str::to_string)),
            "auto_stop" => Self::AutoStop,
            _ => return None,
        };
        Some(command)
    }

    /// Command name without the leading slash, as registered with the bot.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Help => "help",
            Self::Status => "status",
            Self::Toggle => "toggle",
            Self::AutoStart(_) => "auto_start",
            Self::AutoStop => "auto_stop",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_parse_simple_commands() {
        assert_eq!(Command::parse("/start"), Some(Command::Start));
        assert_eq!(Command::parse("/help"), Some(Command::Help));
        assert_eq!(Command::parse("/status"), Some(Command::Status));
        assert_eq!(Command::parse("/toggle"), Some(Command::Toggle));
        assert_eq!(Command::parse("/auto_stop"), Some(Command::AutoStop));
    }

    #[test]
    fn should_parse_auto_start_without_argument() {
        assert_eq!(Command::parse("/auto_start"), Some(Command::AutoStart(None)));
    }

    #[test]
    fn should_parse_auto_start_with_argument() {
        assert_eq!(
            Command::parse("/auto_start 15"),
            Some(Command::AutoStart(Some("15".to_string())))
        );
    }

    #[test]
    fn should_keep_invalid_argument_for_later_validation() {
        assert_eq!(
            Command::parse("/auto_start abc"),
            Some(Command::AutoStart(Some("abc".to_string())))
        );
    }

    #[test]
    fn should_strip_bot_mention() {
        assert_eq!(Command::parse("/status@acswitch_bot"), Some(Command::Status));
        assert_eq!(
            Command::parse("/auto_start@acswitch_bot 5"),
            Some(Command::AutoStart(Some("5".to_string())))
        );
    }

    #[test]
    fn should_accept_mention_of_own_bot() {
        assert_eq!(
            Command::parse_for("/toggle@AcSwitch_Bot", Some("acswitch_bot")),
            Some(Command::Toggle)
        );
        assert_eq!(
            Command::parse_for("/status", Some("acswitch_bot")),
            Some(Command::Status)
        );
        assert_eq!(
            Command::parse_for("/status@acswitch_bot", Some("@acswitch_bot")),
            Some(Command::Status)
        );
    }

    #[test]
    fn should_ignore_command_addressed_to_other_bot() {
        assert_eq!(
            Command::parse_for("/toggle@some_other_bot", Some("acswitch_bot")),
            None
        );
        assert_eq!(
            Command::parse_for("/auto_start@some_other_bot 5", Some("acswitch_bot")),
            None
        );
    }

    #[test]
    fn should_ignore_case_of_command_name() {
        assert_eq!(Command::parse("/STATUS"), Some(Command::Status));
    }

    #[test]
    fn should_trim_surrounding_whitespace() {
        assert_eq!(Command::parse("  /toggle  "), Some(Command::Toggle));
    }

    #[test]
    fn should_reject_plain_text() {
        assert_eq!(Command::parse("hello"), None);
        assert_eq!(Command::parse(""), None);
    }

    #[test]
    fn should_reject_unknown_command() {
        assert_eq!(Command::parse("/reboot"), None);
        assert_eq!(Command::parse("/"), None);
    }

    #[test]
    fn should_report_command_name() {
        assert_eq!(Command::AutoStart(None).name(), "auto_start");
        assert_eq!(Command::AutoStop.name(), "auto_stop");
    }
}
