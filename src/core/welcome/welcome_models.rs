use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Value shown for `lastUpdated` before the first count was ever recorded.
pub const NEVER_UPDATED: &str = "Never";

/// Cached member count for one guild.
///
/// The count is always refreshed from the platform before it is written, so
/// this record is only ever a cache of the live value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberCountRecord {
    pub count: u64,
    pub last_updated: String,
}

impl MemberCountRecord {
    pub fn new(count: u64, updated_at: DateTime<Utc>) -> Self {
        Self {
            count,
            last_updated: format_last_updated(updated_at),
        }
    }
}

impl Default for MemberCountRecord {
    fn default() -> Self {
        Self {
            count: 0,
            last_updated: NEVER_UPDATED.to_string(),
        }
    }
}

/// The whole persisted config file:
/// { "welcomeChannels": { guild_id: channel_id }, "memberCounts": { guild_id: record } }
///
/// Ids are kept as strings so the file matches what Discord shows users.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuildConfigDocument {
    pub welcome_channels: BTreeMap<String, String>,
    pub member_counts: BTreeMap<String, MemberCountRecord>,
}

/// ISO-8601 in UTC with millisecond precision, e.g. `2026-10-19T08:30:00.000Z`.
pub fn format_last_updated(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

// ============================================================================
// EVENTS
// ============================================================================
// Platform-agnostic versions of the gateway events the bot reacts to.
// The Discord layer translates serenity events into these.

#[derive(Debug, Clone)]
pub enum GuildEvent {
    /// The bot finished connecting and knows which guilds it is in.
    Startup { guild_ids: Vec<u64> },
    MemberJoined(JoinedMember),
    MemberLeft { guild_id: u64, user_id: u64 },
    MessageReceived(IncomingMessage),
}

/// What we need to greet a new member.
#[derive(Debug, Clone)]
pub struct JoinedMember {
    pub guild_id: u64,
    pub user_id: u64,
    pub avatar_url: String,
    pub joined_at: Option<DateTime<Utc>>,
}

/// Where a message came from, so replies can reference it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageOrigin {
    pub guild_id: u64,
    pub channel_id: u64,
    pub message_id: u64,
    pub author_id: u64,
}

#[derive(Debug, Clone)]
pub struct IncomingMessage {
    /// None for direct messages.
    pub guild_id: Option<u64>,
    pub channel_id: u64,
    pub message_id: u64,
    pub author_id: u64,
    pub author_is_bot: bool,
    pub content: String,
}

impl IncomingMessage {
    pub fn origin(&self) -> Option<MessageOrigin> {
        self.guild_id.map(|guild_id| MessageOrigin {
            guild_id,
            channel_id: self.channel_id,
            message_id: self.message_id,
            author_id: self.author_id,
        })
    }
}

/// Guild metadata used when formatting notices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuildProfile {
    pub name: String,
    pub icon_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_last_updated_format() {
        let at = Utc.with_ymd_and_hms(2026, 10, 19, 8, 30, 0).unwrap();
        assert_eq!(format_last_updated(at), "2026-10-19T08:30:00.000Z");
    }

    #[test]
    fn test_document_wire_shape() {
        let mut doc = GuildConfigDocument::default();
        doc.welcome_channels.insert("1".into(), "123".into());
        doc.member_counts
            .insert("1".into(), MemberCountRecord::default());

        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(json["welcomeChannels"]["1"], "123");
        assert_eq!(json["memberCounts"]["1"]["count"], 0);
        assert_eq!(json["memberCounts"]["1"]["lastUpdated"], "Never");
    }
}
