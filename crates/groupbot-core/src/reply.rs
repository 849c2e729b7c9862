//! Transport-neutral reply model.
//!
//! Handlers describe what to say; the dispatcher decides how it looks.

use chrono::{DateTime, Utc};

pub const SUCCESS_EMOJI: &str = "\u{2705}";
pub const ERROR_EMOJI: &str = "\u{274C}";

/// Name for embed fields that should render without a heading.
pub const BLANK_FIELD_NAME: &str = "\u{200B}";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Text(String),
    Embed(Embed),
}

impl Reply {
    pub fn text(text: impl Into<String>) -> Self {
        Reply::Text(text.into())
    }

    pub fn success(text: impl AsRef<str>) -> Self {
        Reply::Text(format!("{} {}", SUCCESS_EMOJI, text.as_ref()))
    }

    pub fn error(text: impl AsRef<str>) -> Self {
        Reply::Text(format!("{} {}", ERROR_EMOJI, text.as_ref()))
    }

    /// Every piece of visible text, joined. Handy for assertions and logs.
    pub fn plain_text(&self) -> String {
        match self {
            Reply::Text(text) => text.clone(),
            Reply::Embed(embed) => embed.plain_text(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Embed {
    pub author: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub fields: Vec<EmbedField>,
    pub footer: Option<EmbedFooter>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedFooter {
    pub text: String,
    /// Rendered after `text` in the viewer-facing time zone.
    pub timestamp: Option<ZonedTimestamp>,
}

/// Raw instant plus the zone it should be shown in. Formatting is left to
/// the renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZonedTimestamp {
    pub at: DateTime<Utc>,
    pub time_zone: String,
}

impl Embed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push(EmbedField {
            name: name.into(),
            value: value.into(),
        });
        self
    }

    pub fn footer(mut self, text: impl Into<String>) -> Self {
        self.footer = Some(EmbedFooter {
            text: text.into(),
            timestamp: None,
        });
        self
    }

    pub fn footer_with_timestamp(mut self, text: impl Into<String>, timestamp: ZonedTimestamp) -> Self {
        self.footer = Some(EmbedFooter {
            text: text.into(),
            timestamp: Some(timestamp),
        });
        self
    }

    pub fn plain_text(&self) -> String {
        let mut parts: Vec<&str> = Vec::new();
        parts.extend(self.author.as_deref());
        parts.extend(self.title.as_deref());
        parts.extend(self.description.as_deref());
        for field in &self.fields {
            parts.push(&field.name);
            parts.push(&field.value);
        }
        if let Some(footer) = &self.footer {
            parts.push(&footer.text);
        }
        parts.join("\n")
    }
}
