use super::welcome_models::{GuildConfigDocument, MemberCountRecord};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Per-guild bot configuration: welcome channels and cached member counts.
///
/// Every mutating call must leave the persisted copy in sync with memory
/// before it returns.
#[async_trait]
pub trait GuildConfigStore: Send + Sync {
    async fn set_welcome_channel(&self, guild_id: u64, channel_id: u64) -> Result<(), StoreError>;

    /// `None` means no welcome channel is configured.
    async fn get_welcome_channel(&self, guild_id: u64) -> Result<Option<u64>, StoreError>;

    async fn record_member_count(
        &self,
        guild_id: u64,
        count: u64,
        updated_at: DateTime<Utc>,
    ) -> Result<(), StoreError>;

    /// Returns `{count: 0, lastUpdated: "Never"}` for guilds never recorded.
    async fn get_member_count(&self, guild_id: u64) -> Result<MemberCountRecord, StoreError>;

    async fn snapshot(&self) -> Result<GuildConfigDocument, StoreError>;
}
