// Discord adapters for the welcome service.

pub mod embeds;
pub mod events;
pub mod platform;
