// This is the entry point of the welcome bot.
//
// **Architecture Overview:**
// - `core/` = Business logic (platform-agnostic)
// - `infra/` = Implementations of core traits (the JSON config file)
// - `discord/` = Discord-specific adapters (events, embeds, presence)
//
// This file's job is to:
// 1. Load configuration
// 2. Initialize services (dependency injection)
// 3. Set up the Discord framework
// 4. Forward gateway events to the welcome service

// These attrs point each module declaration at a more descriptive root file
// so we don't end up with half a dozen mod.rs files that all look the same.
#[path = "core/core_layer.rs"]
mod core;
#[path = "discord/discord_layer.rs"]
mod discord;
#[path = "infra/infra_layer.rs"]
mod infra;
mod settings;

use crate::core::welcome::{GuildConfigStore, WelcomeService};
use crate::discord::commands::presence;
use crate::discord::welcome::events as welcome_events;
use crate::discord::{Data, Error};
use crate::infra::welcome::JsonGuildConfigStore;
use crate::settings::BotSettings;
use anyhow::Context as _;
use poise::serenity_prelude as serenity;
use std::sync::Arc;

/// Event handler for non-command Discord events.
/// Member joins/leaves, prefix commands and the startup sweep all go through
/// the welcome service; a failure only abandons the event that caused it.
async fn event_handler(
    ctx: &serenity::Context,
    event: &serenity::FullEvent,
    _framework: poise::FrameworkContext<'_, Data, Error>,
    data: &Data,
) -> Result<(), Error> {
    if let Err(e) = welcome_events::handle_event(ctx, event, data).await {
        tracing::error!("Error handling {} event: {:#}", event.snake_case_name(), e);
    }

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging so we can see what's happening
    tracing_subscriber::fmt::init();

    // Load environment variables from .env file (if it exists)
    dotenv::dotenv().ok();

    let settings = BotSettings::from_env()?;

    // ========================================================================
    // DEPENDENCY INJECTION
    // ========================================================================
    // A corrupt config file stops us here rather than being overwritten later.

    let store = JsonGuildConfigStore::load(&settings.config_path)
        .await
        .with_context(|| {
            format!(
                "Failed to load guild config from {}",
                settings.config_path.display()
            )
        })?;
    let welcome_service = Arc::new(WelcomeService::new(store, settings.prefix.clone()));

    let snapshot = welcome_service.store().snapshot().await?;
    tracing::info!(
        path = %welcome_service.store().path().display(),
        welcome_channels = snapshot.welcome_channels.len(),
        tracked_guilds = snapshot.member_counts.len(),
        "Loaded guild config"
    );

    let data = Data {
        welcome: Arc::clone(&welcome_service),
    };

    // ========================================================================
    // DISCORD FRAMEWORK SETUP
    // ========================================================================

    let intents = serenity::GatewayIntents::GUILD_MESSAGES
        | serenity::GatewayIntents::MESSAGE_CONTENT // Required to read message content
        | serenity::GatewayIntents::GUILDS
        | serenity::GatewayIntents::GUILD_MEMBERS;

    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            // Prefix commands are parsed by the welcome service
            commands: vec![],
            event_handler: |ctx, event, framework, data| {
                Box::pin(event_handler(ctx, event, framework, data))
            },
            ..Default::default()
        })
        .setup(|ctx, ready, _framework| {
            Box::pin(async move {
                tracing::info!("Logged in as {}!", ready.user.tag());
                tracing::info!("Bot is in {} servers", ready.guilds.len());

                presence::on_ready(ctx, data.welcome.prefix());

                // Member counts are refreshed by the Ready event handler.
                Ok(data)
            })
        })
        .build();

    let mut client = serenity::ClientBuilder::new(&settings.token, intents)
        .framework(framework)
        .await
        .context("Error creating client")?;

    client.start().await.context("Error running bot")?;
    Ok(())
}
