// Discord layer - event adapters and bot presence.

use crate::core::welcome::WelcomeService;
use crate::infra::welcome::JsonGuildConfigStore;
use std::sync::Arc;

#[path = "commands/command_catalog.rs"]
pub mod commands;

#[path = "welcome/mod.rs"]
pub mod welcome;

/// Shared state handed to every poise callback.
pub struct Data {
    pub welcome: Arc<WelcomeService<JsonGuildConfigStore>>,
}

pub type Error = Box<dyn std::error::Error + Send + Sync>;
