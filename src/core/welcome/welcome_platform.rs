// The platform port: everything the welcome service needs from the chat
// platform. The Discord layer implements it on top of serenity; tests use a
// recording fake.

use super::welcome_models::{GuildProfile, MessageOrigin};
use super::welcome_notices::Notice;
use async_trait::async_trait;

#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    #[error("Guild {0} is not available")]
    GuildUnavailable(u64),
    #[error("Platform request failed: {0}")]
    Request(String),
}

/// A response to a command message.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Text(String),
    Notice(Notice),
}

#[async_trait]
pub trait GuildPlatform: Send + Sync {
    /// Authoritative member count, straight from the platform.
    async fn live_member_count(&self, guild_id: u64) -> Result<u64, PlatformError>;

    async fn guild_profile(&self, guild_id: u64) -> Result<GuildProfile, PlatformError>;

    /// Whether `channel_id` still resolves to a channel of `guild_id`.
    async fn channel_exists(&self, guild_id: u64, channel_id: u64) -> Result<bool, PlatformError>;

    async fn has_manage_guild(&self, guild_id: u64, user_id: u64) -> Result<bool, PlatformError>;

    async fn send_notice(&self, channel_id: u64, notice: Notice) -> Result<(), PlatformError>;

    async fn reply(&self, origin: &MessageOrigin, reply: Reply) -> Result<(), PlatformError>;
}
