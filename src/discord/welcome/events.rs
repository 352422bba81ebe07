use super::platform::SerenityPlatform;
use crate::core::welcome::{GuildEvent, IncomingMessage, JoinedMember};
use crate::discord::Data;
use anyhow::Result;
use poise::serenity_prelude as serenity;

/// Translate the gateway events we care about into core `GuildEvent`s.
/// Everything else maps to `None`.
pub fn to_guild_event(event: &serenity::FullEvent) -> Option<GuildEvent> {
    match event {
        // Ready lists every guild, including ones still unavailable; their
        // counts come over HTTP when the cache doesn't have them yet
        serenity::FullEvent::Ready { data_about_bot } => {
            Some(startup_event(&data_about_bot.guilds))
        }
        serenity::FullEvent::GuildMemberAddition { new_member } => {
            Some(GuildEvent::MemberJoined(JoinedMember {
                guild_id: new_member.guild_id.get(),
                user_id: new_member.user.id.get(),
                avatar_url: new_member.user.face(),
                joined_at: new_member.joined_at.map(|t| *t),
            }))
        }
        serenity::FullEvent::GuildMemberRemoval { guild_id, user, .. } => {
            Some(GuildEvent::MemberLeft {
                guild_id: guild_id.get(),
                user_id: user.id.get(),
            })
        }
        serenity::FullEvent::Message { new_message } => {
            Some(GuildEvent::MessageReceived(IncomingMessage {
                guild_id: new_message.guild_id.map(|id| id.get()),
                channel_id: new_message.channel_id.get(),
                message_id: new_message.id.get(),
                author_id: new_message.author.id.get(),
                author_is_bot: new_message.author.bot,
                content: new_message.content.clone(),
            }))
        }
        _ => None,
    }
}

fn startup_event(guilds: &[serenity::UnavailableGuild]) -> GuildEvent {
    GuildEvent::Startup {
        guild_ids: guilds.iter().map(|g| g.id.get()).collect(),
    }
}

/// Route one gateway event through the welcome service.
pub async fn handle_event(
    ctx: &serenity::Context,
    event: &serenity::FullEvent,
    data: &Data,
) -> Result<()> {
    let guild_event = match to_guild_event(event) {
        Some(e) => e,
        None => return Ok(()),
    };

    if let GuildEvent::Startup { guild_ids } = &guild_event {
        tracing::info!("Refreshing member counts for {} guilds", guild_ids.len());
    }

    let platform = SerenityPlatform::new(ctx);
    data.welcome.dispatch(&platform, guild_event).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_startup_includes_unavailable_guilds() {
        let guilds: Vec<serenity::UnavailableGuild> = serde_json::from_value(serde_json::json!([
            { "id": "1", "unavailable": true },
            { "id": "2", "unavailable": false }
        ]))
        .unwrap();

        match startup_event(&guilds) {
            GuildEvent::Startup { guild_ids } => assert_eq!(guild_ids, vec![1, 2]),
            other => panic!("expected a startup event, got {:?}", other),
        }
    }
}
