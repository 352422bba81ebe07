// The welcome service routes guild events: it keeps member counts fresh,
// greets new members and answers the prefix commands.
//
// Like the rest of core/, nothing here knows about serenity. Everything the
// service needs from Discord goes through the `GuildPlatform` port, and
// everything it needs to remember goes through the `GuildConfigStore` port.

use super::welcome_commands::{parse_command, Command};
use super::welcome_models::{GuildEvent, IncomingMessage, JoinedMember, MessageOrigin};
use super::welcome_notices::{
    help_notice, member_count_notice, welcome_channel_set_message, welcome_notice,
    PERMISSION_DENIED,
};
use super::welcome_platform::{GuildPlatform, PlatformError, Reply};
use super::welcome_store::{GuildConfigStore, StoreError};
use chrono::Utc;
use dashmap::DashMap;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;

pub const DEFAULT_PREFIX: &str = "!";

#[derive(Debug, Error)]
pub enum WelcomeError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
    #[error("Platform error: {0}")]
    Platform(#[from] PlatformError),
}

pub struct WelcomeService<S: GuildConfigStore> {
    store: S,
    prefix: String,
    /// Serializes fetch-then-record per guild so counts land in order.
    guild_locks: DashMap<u64, Arc<Mutex<()>>>,
}

impl<S: GuildConfigStore> WelcomeService<S> {
    pub fn new(store: S, prefix: impl Into<String>) -> Self {
        Self {
            store,
            prefix: prefix.into(),
            guild_locks: DashMap::new(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Handle one event to completion.
    ///
    /// Errors are per-event: whatever was already recorded stays recorded and
    /// the caller decides how to report the failure.
    pub async fn dispatch(
        &self,
        platform: &dyn GuildPlatform,
        event: GuildEvent,
    ) -> Result<(), WelcomeError> {
        match event {
            GuildEvent::Startup { guild_ids } => self.on_startup(platform, &guild_ids).await,
            GuildEvent::MemberJoined(member) => self.on_member_joined(platform, &member).await,
            GuildEvent::MemberLeft { guild_id, user_id } => {
                tracing::debug!(guild_id, user_id, "Member left");
                self.refresh_member_count(platform, guild_id).await?;
                Ok(())
            }
            GuildEvent::MessageReceived(message) => self.on_message(platform, &message).await,
        }
    }

    async fn on_startup(
        &self,
        platform: &dyn GuildPlatform,
        guild_ids: &[u64],
    ) -> Result<(), WelcomeError> {
        for &guild_id in guild_ids {
            // One unreachable guild shouldn't keep the others stale
            if let Err(e) = self.refresh_member_count(platform, guild_id).await {
                tracing::warn!(guild_id, "Failed to refresh member count at startup: {}", e);
            }
        }
        Ok(())
    }

    /// Fetch the live count and cache it. A failed fetch leaves the cached
    /// record untouched.
    async fn refresh_member_count(
        &self,
        platform: &dyn GuildPlatform,
        guild_id: u64,
    ) -> Result<u64, WelcomeError> {
        let lock = self.guild_locks.entry(guild_id).or_default().value().clone();
        let _guard = lock.lock().await;

        let count = platform.live_member_count(guild_id).await?;
        self.store
            .record_member_count(guild_id, count, Utc::now())
            .await?;

        tracing::debug!(guild_id, count, "Member count updated");
        Ok(count)
    }

    async fn on_member_joined(
        &self,
        platform: &dyn GuildPlatform,
        member: &JoinedMember,
    ) -> Result<(), WelcomeError> {
        let guild_id = member.guild_id;
        let count = self.refresh_member_count(platform, guild_id).await?;

        let channel_id = match self.store.get_welcome_channel(guild_id).await? {
            Some(id) => id,
            None => return Ok(()), // Not configured
        };

        if !platform.channel_exists(guild_id, channel_id).await? {
            tracing::debug!(guild_id, channel_id, "Welcome channel no longer exists");
            return Ok(());
        }

        let guild = platform.guild_profile(guild_id).await?;
        let now = Utc::now();
        let notice = welcome_notice(
            &guild,
            member.user_id,
            &member.avatar_url,
            count,
            member.joined_at.unwrap_or(now),
            now,
        );

        platform.send_notice(channel_id, notice).await?;
        Ok(())
    }

    async fn on_message(
        &self,
        platform: &dyn GuildPlatform,
        message: &IncomingMessage,
    ) -> Result<(), WelcomeError> {
        if message.author_is_bot {
            return Ok(());
        }

        // Commands only make sense inside a guild
        let origin = match message.origin() {
            Some(origin) => origin,
            None => return Ok(()),
        };

        let command = match parse_command(&message.content, &self.prefix) {
            Some(command) => command,
            None => return Ok(()),
        };

        match command {
            Command::SetWelcome { channel_id } => {
                self.set_welcome(platform, &origin, channel_id).await
            }
            Command::Members => {
                let record = self.store.get_member_count(origin.guild_id).await?;
                let guild = platform.guild_profile(origin.guild_id).await?;
                let notice = member_count_notice(&guild, &record, Utc::now());
                platform.reply(&origin, Reply::Notice(notice)).await?;
                Ok(())
            }
            Command::Help => {
                let notice = help_notice(&self.prefix, Utc::now());
                platform.reply(&origin, Reply::Notice(notice)).await?;
                Ok(())
            }
        }
    }

    async fn set_welcome(
        &self,
        platform: &dyn GuildPlatform,
        origin: &MessageOrigin,
        mentioned_channel: Option<u64>,
    ) -> Result<(), WelcomeError> {
        if !platform
            .has_manage_guild(origin.guild_id, origin.author_id)
            .await?
        {
            platform
                .reply(origin, Reply::Text(PERMISSION_DENIED.to_string()))
                .await?;
            return Ok(());
        }

        let channel_id = mentioned_channel.unwrap_or(origin.channel_id);
        self.store
            .set_welcome_channel(origin.guild_id, channel_id)
            .await?;

        tracing::info!(
            guild_id = origin.guild_id,
            channel_id,
            user_id = origin.author_id,
            "Welcome channel set"
        );

        platform
            .reply(origin, Reply::Text(welcome_channel_set_message(channel_id)))
            .await?;
        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================
