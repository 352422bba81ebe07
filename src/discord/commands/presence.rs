// This module handles bot presence and lifecycle events.
//
// Everything here is Discord-layer glue. We only work with Discord SDK types
// (Context, ActivityData, OnlineStatus) and keep the logic short.

use poise::serenity_prelude as serenity;

/// Advertise the help command so people can find the rest.
pub fn show_help_hint(ctx: &serenity::Context, prefix: &str) {
    let activity = serenity::ActivityData::playing(format!("{}help", prefix));
    ctx.set_presence(Some(activity), serenity::OnlineStatus::Online);
}

/// Called once the bot is ready so we can announce a default presence message
/// without repeating the setup code at every call site.
pub fn on_ready(ctx: &serenity::Context, prefix: &str) {
    show_help_hint(ctx, prefix);
}
