use crate::core::welcome::Notice;
use poise::serenity_prelude::{self as serenity, CreateEmbed, CreateEmbedFooter};

/// Render a core `Notice` as a serenity embed.
pub fn to_embed(notice: &Notice) -> CreateEmbed {
    let mut embed = CreateEmbed::new()
        .title(notice.title.clone())
        .colour(serenity::Colour::new(notice.colour));

    if let Some(description) = &notice.description {
        embed = embed.description(description.clone());
    }
    if let Some(thumbnail) = &notice.thumbnail {
        embed = embed.thumbnail(thumbnail.clone());
    }
    for field in &notice.fields {
        embed = embed.field(field.name.clone(), field.value.clone(), field.inline);
    }
    if let Some(footer) = &notice.footer {
        embed = embed.footer(CreateEmbedFooter::new(footer.clone()));
    }
    if let Some(at) = notice.timestamp {
        if let Ok(timestamp) = serenity::Timestamp::from_unix_timestamp(at.timestamp()) {
            embed = embed.timestamp(timestamp);
        }
    }

    embed
}
