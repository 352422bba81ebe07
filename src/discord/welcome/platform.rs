// serenity-backed implementation of the `GuildPlatform` port.
//
// The gateway cache is the primary source: serenity keeps each guild's
// member_count, channel map and member list current as events arrive.
// HTTP is only used when a guild isn't cached yet.
//
// Cache references must never be held across an await, so every cache read
// below is finished within a single statement.

use super::embeds::to_embed;
use crate::core::welcome::{GuildPlatform, GuildProfile, MessageOrigin, Notice, PlatformError, Reply};
use async_trait::async_trait;
use poise::serenity_prelude::{self as serenity, CreateMessage};

pub struct SerenityPlatform<'a> {
    ctx: &'a serenity::Context,
}

impl<'a> SerenityPlatform<'a> {
    pub fn new(ctx: &'a serenity::Context) -> Self {
        Self { ctx }
    }
}

fn request_error(err: serenity::Error) -> PlatformError {
    PlatformError::Request(err.to_string())
}

/// Threads live outside the guild's channel map in the cache, but a welcome
/// channel set from inside a thread is still a valid target.
fn is_known_channel(
    id: serenity::ChannelId,
    channels: impl IntoIterator<Item = serenity::ChannelId>,
    threads: impl IntoIterator<Item = serenity::ChannelId>,
) -> bool {
    channels.into_iter().chain(threads).any(|c| c == id)
}

#[async_trait]
impl<'a> GuildPlatform for SerenityPlatform<'a> {
    async fn live_member_count(&self, guild_id: u64) -> Result<u64, PlatformError> {
        let gid = serenity::GuildId::new(guild_id);
        let cached = self.ctx.cache.guild(gid).map(|g| g.member_count);
        if let Some(count) = cached {
            return Ok(count);
        }

        let guild = self
            .ctx
            .http
            .get_guild_with_counts(gid)
            .await
            .map_err(request_error)?;
        guild
            .approximate_member_count
            .ok_or(PlatformError::GuildUnavailable(guild_id))
    }

    async fn guild_profile(&self, guild_id: u64) -> Result<GuildProfile, PlatformError> {
        let gid = serenity::GuildId::new(guild_id);
        let cached = self.ctx.cache.guild(gid).map(|g| GuildProfile {
            name: g.name.clone(),
            icon_url: g.icon_url(),
        });
        if let Some(profile) = cached {
            return Ok(profile);
        }

        let guild = gid.to_partial_guild(self.ctx).await.map_err(request_error)?;
        Ok(GuildProfile {
            name: guild.name.clone(),
            icon_url: guild.icon_url(),
        })
    }

    async fn channel_exists(&self, guild_id: u64, channel_id: u64) -> Result<bool, PlatformError> {
        let id = serenity::ChannelId::new(channel_id);
        self.ctx
            .cache
            .guild(serenity::GuildId::new(guild_id))
            .map(|g| {
                is_known_channel(
                    id,
                    g.channels.keys().copied(),
                    g.threads.iter().map(|t| t.id),
                )
            })
            .ok_or(PlatformError::GuildUnavailable(guild_id))
    }

    async fn has_manage_guild(&self, guild_id: u64, user_id: u64) -> Result<bool, PlatformError> {
        let gid = serenity::GuildId::new(guild_id);
        let member = gid
            .member(self.ctx, serenity::UserId::new(user_id))
            .await
            .map_err(request_error)?;

        // Owner and ADMINISTRATOR are folded in by member_permissions
        let permissions = self
            .ctx
            .cache
            .guild(gid)
            .map(|g| g.member_permissions(&member))
            .ok_or(PlatformError::GuildUnavailable(guild_id))?;

        Ok(permissions.manage_guild())
    }

    async fn send_notice(&self, channel_id: u64, notice: Notice) -> Result<(), PlatformError> {
        serenity::ChannelId::new(channel_id)
            .send_message(self.ctx, CreateMessage::new().embed(to_embed(&notice)))
            .await
            .map(|_| ())
            .map_err(request_error)
    }

    async fn reply(&self, origin: &MessageOrigin, reply: Reply) -> Result<(), PlatformError> {
        let channel_id = serenity::ChannelId::new(origin.channel_id);
        let message_id = serenity::MessageId::new(origin.message_id);

        let message = match reply {
            Reply::Text(text) => CreateMessage::new().content(text),
            Reply::Notice(notice) => CreateMessage::new().embed(to_embed(&notice)),
        }
        .reference_message((channel_id, message_id));

        channel_id
            .send_message(self.ctx, message)
            .await
            .map(|_| ())
            .map_err(request_error)
    }
}
