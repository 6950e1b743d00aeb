//! Metadata of a single item inside a resolved playlist

use std::borrow::Cow;

use serde::Deserialize;
use serde_json::Value;

/// Text used when a field is missing or `null`, same as yt-dlp's `outtmpl_na_placeholder`
pub const NA_PLACEHOLDER: &str = "NA";

/// One entry of a resolved playlist.
///
/// Only `id` and `title` are consumed; both are kept as the raw json value,
/// because extractors do not guarantee they are strings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EntryRecord {
    #[serde(default)]
    id: Value,
    #[serde(default)]
    title: Value,
}

impl EntryRecord {
    pub fn new(id: impl Into<Value>, title: impl Into<Value>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
        }
    }

    /// The identifier rendered as text
    pub fn id(&self) -> Cow<'_, str> {
        value_to_text(&self.id)
    }

    /// The title rendered as text, suitable for keyword matching
    pub fn title(&self) -> Cow<'_, str> {
        value_to_text(&self.title)
    }
}

/// Render any json value as plain text.
///
/// Strings are taken verbatim (no quotes), `null` becomes [`NA_PLACEHOLDER`],
/// everything else uses its compact json form.
pub fn value_to_text(value: &Value) -> Cow<'_, str> {
    match value {
        Value::String(s) => Cow::Borrowed(s.as_str()),
        Value::Null => Cow::Borrowed(NA_PLACEHOLDER),
        other => Cow::Owned(other.to_string()),
    }
}
