// Runtime settings, read from the environment (and `.env`, which main loads
// first).

use crate::core::welcome::DEFAULT_PREFIX;
use std::path::PathBuf;

pub const DEFAULT_CONFIG_PATH: &str = "data/config.json";

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Missing DISCORD_TOKEN environment variable! Create a .env file with your bot token.")]
    MissingToken,
}

#[derive(Debug, Clone)]
pub struct BotSettings {
    pub token: String,
    pub config_path: PathBuf,
    pub prefix: String,
}

impl BotSettings {
    pub fn from_env() -> Result<Self, SettingsError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from any key/value source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, SettingsError> {
        let non_blank = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let token = non_blank("DISCORD_TOKEN")
            .or_else(|| non_blank("TOKEN"))
            .ok_or(SettingsError::MissingToken)?;

        let config_path = non_blank("WELCOME_CONFIG_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));

        let prefix = non_blank("COMMAND_PREFIX")
            .map(|p| p.trim().to_string())
            .unwrap_or_else(|| DEFAULT_PREFIX.to_string());

        Ok(Self {
            token,
            config_path,
            prefix,
        })
    }
}
