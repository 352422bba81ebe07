//! Builders for the embeds the bot posts.
//!
//! A [`Notice`] is a platform-agnostic description of an embed. The Discord
//! layer turns it into a serenity `CreateEmbed`; keeping the wording here
//! means it can be tested without a gateway connection.

use super::welcome_models::{GuildProfile, MemberCountRecord};
use chrono::{DateTime, Utc};

pub const WELCOME_COLOUR: u32 = 0x00ff00;
pub const MEMBERS_COLOUR: u32 = 0x0099ff;
pub const HELP_COLOUR: u32 = 0xffff00;

pub const PERMISSION_DENIED: &str = "You need the Manage Server permission to use this command!";

#[derive(Debug, Clone, PartialEq)]
pub struct NoticeField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub title: String,
    pub description: Option<String>,
    pub colour: u32,
    pub thumbnail: Option<String>,
    pub fields: Vec<NoticeField>,
    pub footer: Option<String>,
    pub timestamp: Option<DateTime<Utc>>,
}

impl Notice {
    fn new(title: impl Into<String>, colour: u32) -> Self {
        Self {
            title: title.into(),
            description: None,
            colour,
            thumbnail: None,
            fields: Vec::new(),
            footer: None,
            timestamp: None,
        }
    }

    fn description(mut self, text: impl Into<String>) -> Self {
        self.description = Some(text.into());
        self
    }

    fn field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push(NoticeField {
            name: name.into(),
            value: value.into(),
            inline: false,
        });
        self
    }
}

/// The greeting posted in the welcome channel when someone joins.
pub fn welcome_notice(
    guild: &GuildProfile,
    user_id: u64,
    avatar_url: &str,
    member_number: u64,
    joined_at: DateTime<Utc>,
    now: DateTime<Utc>,
) -> Notice {
    let mut notice = Notice::new("Welcome to the server!", WELCOME_COLOUR)
        .description(format!(
            "Hello, <@{}>! Welcome to **{}**!",
            user_id, guild.name
        ))
        .field("Member Count", format!("You are member #{}!", member_number))
        .field("Joined At", format_utc_string(joined_at));

    notice.thumbnail = Some(avatar_url.to_string());
    notice.footer = Some("We hope you enjoy your stay!".to_string());
    notice.timestamp = Some(now);
    notice
}

/// Reply to the `members` command.
pub fn member_count_notice(
    guild: &GuildProfile,
    record: &MemberCountRecord,
    now: DateTime<Utc>,
) -> Notice {
    let mut notice = Notice::new(format!("{} - Member Count", guild.name), MEMBERS_COLOUR)
        .description(format!(
            "This server currently has **{}** members!",
            record.count
        ));

    notice.thumbnail = guild.icon_url.clone();
    notice.footer = Some(format!("Last updated: {}", record.last_updated));
    notice.timestamp = Some(now);
    notice
}

/// Static command listing for the `help` command.
pub fn help_notice(prefix: &str, now: DateTime<Utc>) -> Notice {
    let mut notice = Notice::new("Bot Commands", HELP_COLOUR)
        .description("Here are the available commands:")
        .field(
            format!("{}setwelcome [#channel]", prefix),
            "Sets the channel for welcome messages (requires Manage Server permission)",
        )
        .field(
            format!("{}members", prefix),
            "Shows the current member count of the server",
        )
        .field(format!("{}help", prefix), "Shows this help message");

    notice.timestamp = Some(now);
    notice
}

pub fn welcome_channel_set_message(channel_id: u64) -> String {
    format!("Welcome channel has been set to <#{}>!", channel_id)
}

/// RFC 1123 style, e.g. `Mon, 19 Oct 2026 08:30:00 GMT`.
pub fn format_utc_string(at: DateTime<Utc>) -> String {
    at.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn guild() -> GuildProfile {
        GuildProfile {
            name: "Rustaceans".to_string(),
            icon_url: Some("https://cdn.example/icon.png".to_string()),
        }
    }

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, hour, 30, 0).unwrap()
    }

    #[test]
    fn test_utc_string_format() {
        assert_eq!(format_utc_string(at(8)), "Mon, 19 Oct 2026 08:30:00 GMT");
    }

    #[test]
    fn test_welcome_notice_contents() {
        let notice = welcome_notice(&guild(), 42, "https://cdn.example/a.png", 6, at(8), at(9));

        assert_eq!(notice.title, "Welcome to the server!");
        assert_eq!(notice.colour, WELCOME_COLOUR);
        assert_eq!(
            notice.description.as_deref(),
            Some("Hello, <@42>! Welcome to **Rustaceans**!")
        );
        assert_eq!(notice.thumbnail.as_deref(), Some("https://cdn.example/a.png"));
        assert_eq!(notice.fields[0].name, "Member Count");
        assert_eq!(notice.fields[0].value, "You are member #6!");
        assert_eq!(notice.fields[1].name, "Joined At");
        assert_eq!(notice.fields[1].value, "Mon, 19 Oct 2026 08:30:00 GMT");
        assert_eq!(notice.footer.as_deref(), Some("We hope you enjoy your stay!"));
        assert_eq!(notice.timestamp, Some(at(9)));
    }

    #[test]
    fn test_member_count_notice_uses_default_record() {
        let notice = member_count_notice(&guild(), &MemberCountRecord::default(), at(8));

        assert_eq!(notice.title, "Rustaceans - Member Count");
        assert_eq!(
            notice.description.as_deref(),
            Some("This server currently has **0** members!")
        );
        assert_eq!(notice.footer.as_deref(), Some("Last updated: Never"));
        assert_eq!(notice.thumbnail.as_deref(), Some("https://cdn.example/icon.png"));
    }

    #[test]
    fn test_help_lists_all_commands_with_prefix() {
        let notice = help_notice("?", at(8));
        let names: Vec<&str> = notice.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["?setwelcome [#channel]", "?members", "?help"]);
        assert_eq!(notice.colour, HELP_COLOUR);
    }
}
