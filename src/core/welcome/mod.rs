pub mod welcome_commands;
pub mod welcome_models;
pub mod welcome_notices;
pub mod welcome_platform;
pub mod welcome_service;
pub mod welcome_store;

pub use welcome_models::{
    GuildConfigDocument, GuildEvent, GuildProfile, IncomingMessage, JoinedMember,
    MemberCountRecord, MessageOrigin,
};
pub use welcome_notices::Notice;
pub use welcome_platform::{GuildPlatform, PlatformError, Reply};
pub use welcome_service::{WelcomeService, DEFAULT_PREFIX};
pub use welcome_store::{GuildConfigStore, StoreError};
