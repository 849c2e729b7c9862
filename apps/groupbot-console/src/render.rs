//! Plain-text rendering of replies.

use chrono::SecondsFormat;
use chrono_tz::Tz;
use tracing::warn;

use groupbot_core::reply::{Embed, Reply, ZonedTimestamp, BLANK_FIELD_NAME};
use groupbot_shared::constants::DEFAULT_TIME_ZONE;

pub fn render_reply(reply: &Reply) -> String {
    match reply {
        Reply::Text(text) => text.clone(),
        Reply::Embed(embed) => render_embed(embed),
    }
}

pub fn render_embed(embed: &Embed) -> String {
    let mut lines: Vec<String> = Vec::new();

    if let Some(author) = &embed.author {
        lines.push(format!("== {} ==", author));
    }
    if let Some(title) = &embed.title {
        lines.push(format!("# {}", title));
    }
    if let Some(description) = &embed.description {
        lines.push(description.trim_end().to_string());
    }
    for field in &embed.fields {
        if field.name != BLANK_FIELD_NAME {
            lines.push(format!("{}:", field.name));
        }
        lines.push(field.value.clone());
    }
    if let Some(footer) = &embed.footer {
        let footer_line = match &footer.timestamp {
            Some(timestamp) => format!("{} | Created on {}", footer.text, format_timestamp(timestamp)),
            None => footer.text.clone(),
        };
        lines.push(format!("-- {}", footer_line));
    }

    lines.join("\n")
}

/// Local time in the owning system's zone, falling back to UTC when the zone
/// name is unknown.
pub fn format_timestamp(timestamp: &ZonedTimestamp) -> String {
    if timestamp.time_zone.eq_ignore_ascii_case(DEFAULT_TIME_ZONE) {
        return timestamp.at.to_rfc3339_opts(SecondsFormat::Secs, true);
    }

    match timestamp.time_zone.parse::<Tz>() {
        Ok(tz) => format!(
            "{} ({})",
            timestamp.at.with_timezone(&tz).to_rfc3339_opts(SecondsFormat::Secs, true),
            tz.name()
        ),
        Err(_) => {
            warn!("Unknown time zone {:?}, showing UTC", timestamp.time_zone);
            timestamp.at.to_rfc3339_opts(SecondsFormat::Secs, true)
        }
    }
}
