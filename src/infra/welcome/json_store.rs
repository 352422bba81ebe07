use crate::core::welcome::{
    GuildConfigDocument, GuildConfigStore, MemberCountRecord, StoreError,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::RwLock;

/// JSON-file guild config. The whole document lives in memory and is
/// rewritten after every change:
/// { "welcomeChannels": { guild_id: channel_id }, "memberCounts": { guild_id: record } }
pub struct JsonGuildConfigStore {
    path: PathBuf,
    cache: RwLock<GuildConfigDocument>,
}

impl JsonGuildConfigStore {
    /// Load the document, creating an empty one on first run.
    ///
    /// A file that exists but doesn't parse is an error; we never silently
    /// start over on top of someone's config.
    pub async fn load(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();

        if fs::try_exists(&path).await? {
            let raw = fs::read_to_string(&path).await?;
            let document: GuildConfigDocument = serde_json::from_str(&raw)?;
            return Ok(Self {
                path,
                cache: RwLock::new(document),
            });
        }

        let document = GuildConfigDocument::default();
        write_atomically(&path, &document).await?;
        tracing::info!(path = %path.display(), "Created empty guild config");

        Ok(Self {
            path,
            cache: RwLock::new(document),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Write to `<path>.tmp` and rename over the target so a crash mid-write
/// never leaves a truncated config behind.
async fn write_atomically(path: &Path, document: &GuildConfigDocument) -> Result<(), StoreError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).await?;
    }

    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    let json = serde_json::to_string_pretty(document)?;
    fs::write(&tmp, json.as_bytes()).await?;
    fs::rename(&tmp, path).await?;
    Ok(())
}

#[async_trait]
impl GuildConfigStore for JsonGuildConfigStore {
    async fn set_welcome_channel(&self, guild_id: u64, channel_id: u64) -> Result<(), StoreError> {
        // Keep the write lock while persisting so the file always reflects
        // one consistent document
        let mut cache = self.cache.write().await;
        cache
            .welcome_channels
            .insert(guild_id.to_string(), channel_id.to_string());
        write_atomically(&self.path, &cache).await
    }

    async fn get_welcome_channel(&self, guild_id: u64) -> Result<Option<u64>, StoreError> {
        let cache = self.cache.read().await;
        let raw = match cache.welcome_channels.get(&guild_id.to_string()) {
            Some(raw) => raw,
            None => return Ok(None),
        };

        match raw.parse::<u64>() {
            Ok(id) => Ok(Some(id)),
            Err(_) => {
                tracing::warn!(guild_id, value = %raw, "Ignoring invalid welcome channel id");
                Ok(None)
            }
        }
    }

    async fn record_member_count(
        &self,
        guild_id: u64,
        count: u64,
        updated_at: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        let mut cache = self.cache.write().await;
        cache
            .member_counts
            .insert(guild_id.to_string(), MemberCountRecord::new(count, updated_at));
        write_atomically(&self.path, &cache).await
    }

    async fn get_member_count(&self, guild_id: u64) -> Result<MemberCountRecord, StoreError> {
        let cache = self.cache.read().await;
        Ok(cache
            .member_counts
            .get(&guild_id.to_string())
            .cloned()
            .unwrap_or_default())
    }

    async fn snapshot(&self) -> Result<GuildConfigDocument, StoreError> {
        Ok(self.cache.read().await.clone())
    }
}
