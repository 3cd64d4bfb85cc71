//! Announcement message builder.
//!
//! Splits an announcement into Discord messages. Fields are spread over as many
//! embeds as needed, each posted as its own message; every text is cut down to the
//! Discord limit of its slot.

use serenity::all::{CreateEmbed, CreateMessage};

use crate::server::{
    model::announcement::{AnnouncementField, AnnouncementParam},
    util::text::truncate_with_ellipsis,
};

pub const MAX_FIELDS_PER_EMBED: usize = 25;
pub const MAX_EMBED_CHARS: usize = 6000;
pub const MAX_TITLE_CHARS: usize = 256;
pub const MAX_DESCRIPTION_CHARS: usize = 4096;
pub const MAX_FIELD_NAME_CHARS: usize = 256;
pub const MAX_FIELD_VALUE_CHARS: usize = 1024;
pub const MAX_CONTENT_CHARS: usize = 2000;

/// Cuts `value` to at most `limit` characters, ellipsis included.
fn fit(value: &str, limit: usize) -> String {
    if value.chars().count() <= limit {
        value.to_string()
    } else {
        truncate_with_ellipsis(value, limit.saturating_sub(3))
    }
}

fn fitted_field(field: &AnnouncementField) -> (String, String, bool) {
    (
        fit(&field.name, MAX_FIELD_NAME_CHARS),
        fit(&field.value, MAX_FIELD_VALUE_CHARS),
        field.inline,
    )
}

/// Groups fields into embed-sized chunks.
///
/// A chunk closes at `MAX_FIELDS_PER_EMBED` fields or when the next field would push
/// the embed over `MAX_EMBED_CHARS`. `header_chars` is reserved in the first chunk
/// for the title and description.
fn chunk_fields(
    fields: Vec<(String, String, bool)>,
    header_chars: usize,
) -> Vec<Vec<(String, String, bool)>> {
    let mut chunks = Vec::new();
    let mut current = Vec::new();
    let mut current_chars = header_chars;

    for field in fields {
        let field_chars = field.0.chars().count() + field.1.chars().count();
        let full = current.len() == MAX_FIELDS_PER_EMBED
            || current_chars + field_chars > MAX_EMBED_CHARS;

        if full && !current.is_empty() {
            chunks.push(std::mem::take(&mut current));
            current_chars = 0;
        }

        current_chars += field_chars;
        current.push(field);
    }

    if !current.is_empty() {
        chunks.push(current);
    }

    chunks
}

/// Builds the embeds of an announcement.
///
/// Title and description go on the first embed only; the colour is repeated on
/// every embed. Returns no embeds for a content-only announcement.
pub fn build_embeds(param: &AnnouncementParam) -> Vec<CreateEmbed> {
    let title = param.title.as_deref().map(|t| fit(t, MAX_TITLE_CHARS));
    let description = param
        .description
        .as_deref()
        .map(|d| fit(d, MAX_DESCRIPTION_CHARS));

    let header_chars = title.as_ref().map_or(0, |t| t.chars().count())
        + description.as_ref().map_or(0, |d| d.chars().count());

    let fields = param.fields.iter().map(fitted_field).collect();
    let mut chunks = chunk_fields(fields, header_chars);

    if chunks.is_empty() {
        if title.is_none() && description.is_none() {
            return Vec::new();
        }
        chunks.push(Vec::new());
    }

    chunks
        .into_iter()
        .enumerate()
        .map(|(index, chunk)| {
            let mut embed = CreateEmbed::new().fields(chunk);

            if index == 0 {
                if let Some(title) = &title {
                    embed = embed.title(title);
                }
                if let Some(description) = &description {
                    embed = embed.description(description);
                }
            }
            if let Some(color) = param.color {
                embed = embed.color(color);
            }

            embed
        })
        .collect()
}

/// Builds the messages of an announcement, one per embed.
///
/// The plain content rides on the first message.
pub fn build_messages(param: &AnnouncementParam) -> Vec<CreateMessage> {
    let content = param.content.as_deref().map(|c| fit(c, MAX_CONTENT_CHARS));
    let embeds = build_embeds(param);

    if embeds.is_empty() {
        return content
            .map(|c| vec![CreateMessage::new().content(c)])
            .unwrap_or_default();
    }

    embeds
        .into_iter()
        .enumerate()
        .map(|(index, embed)| {
            let message = CreateMessage::new().embed(embed);
            match (&content, index) {
                (Some(content), 0) => message.content(content),
                _ => message,
            }
        })
        .collect()
}
