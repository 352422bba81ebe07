/// Prefix commands the bot understands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `setwelcome [#channel]`, carrying the first channel mention if any.
    SetWelcome { channel_id: Option<u64> },
    Members,
    Help,
}

/// Parse a message into a command.
///
/// Returns `None` when the message doesn't start with `prefix`, is empty
/// after the prefix, or names a command we don't know. Command names are
/// case-insensitive.
pub fn parse_command(content: &str, prefix: &str) -> Option<Command> {
    let rest = content.strip_prefix(prefix)?.trim_start();
    let name_end = rest.find(char::is_whitespace).unwrap_or(rest.len());
    let (name, args) = rest.split_at(name_end);
    if name.is_empty() {
        return None;
    }

    match name.to_lowercase().as_str() {
        "setwelcome" => Some(Command::SetWelcome {
            channel_id: find_channel_mention(args),
        }),
        "members" => Some(Command::Members),
        "help" => Some(Command::Help),
        _ => None,
    }
}

/// First `<#id>` anywhere in `text`, even when glued to other characters
/// (`here:<#123>!` -> `Some(123)`).
pub fn find_channel_mention(text: &str) -> Option<u64> {
    text.match_indices("<#").find_map(|(start, _)| {
        let tail = &text[start + 2..];
        let digits = &tail[..tail.find('>')?];
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        digits.parse::<u64>().ok()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic_commands() {
        assert_eq!(parse_command("!members", "!"), Some(Command::Members));
        assert_eq!(parse_command("!help", "!"), Some(Command::Help));
        assert_eq!(
            parse_command("!setwelcome", "!"),
            Some(Command::SetWelcome { channel_id: None })
        );
    }

    #[test]
    fn test_command_names_are_case_insensitive() {
        assert_eq!(parse_command("!MeMbErS", "!"), Some(Command::Members));
        assert_eq!(parse_command("!HELP extra words", "!"), Some(Command::Help));
    }

    #[test]
    fn test_setwelcome_picks_first_channel_mention() {
        assert_eq!(
            parse_command("!setwelcome <#123>", "!"),
            Some(Command::SetWelcome {
                channel_id: Some(123)
            })
        );
        assert_eq!(
            parse_command("!setwelcome please   <#77> <#88>", "!"),
            Some(Command::SetWelcome {
                channel_id: Some(77)
            })
        );
        // A user mention is not a channel
        assert_eq!(
            parse_command("!setwelcome <@42>", "!"),
            Some(Command::SetWelcome { channel_id: None })
        );
    }

    #[test]
    fn test_ignored_messages() {
        assert_eq!(parse_command("members", "!"), None);
        assert_eq!(parse_command("!", "!"), None);
        assert_eq!(parse_command("!   ", "!"), None);
        assert_eq!(parse_command("!dance", "!"), None);
        assert_eq!(parse_command("?members", "!"), None);
    }

    #[test]
    fn test_custom_prefix() {
        assert_eq!(parse_command("wb!members", "wb!"), Some(Command::Members));
        assert_eq!(parse_command("!members", "wb!"), None);
    }

    #[test]
    fn test_setwelcome_finds_mentions_inside_text() {
        assert_eq!(
            parse_command("!setwelcome <#123>!", "!"),
            Some(Command::SetWelcome {
                channel_id: Some(123)
            })
        );
        assert_eq!(
            parse_command("!setwelcome here:<#123>", "!"),
            Some(Command::SetWelcome {
                channel_id: Some(123)
            })
        );
    }

    #[test]
    fn test_find_channel_mention() {
        assert_eq!(find_channel_mention("<#5>"), Some(5));
        assert_eq!(find_channel_mention("(<#5>)."), Some(5));
        assert_eq!(find_channel_mention("<#abc> then <#9>"), Some(9));
        assert_eq!(find_channel_mention("<#> <#12>"), Some(12));
        assert_eq!(find_channel_mention("<#abc>"), None);
        assert_eq!(find_channel_mention("#general"), None);
        assert_eq!(find_channel_mention("<#5"), None);
    }
}
