//! Resolve a playlist reference into its entries

mod ytdlp;

use serde_json::Value;

use crate::entry::EntryRecord;

pub use ytdlp::YtDlpResolver;

/// The entries of a resolved playlist, in playlist order.
///
/// `None` marks a position the resolver could not resolve.
pub type ResolvedEntries = Vec<Option<EntryRecord>>;

#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    /// yt-dlp could not be started or exited with a error
    #[error("yt-dlp failed: {0}")]
    Ytdlp(String),
    #[error("yt-dlp did not print any metadata")]
    EmptyOutput,
    #[error("Failed to parse metadata")]
    Json(#[from] serde_json::Error),
}

/// Something that can turn a playlist reference into entries
pub trait Resolver {
    /// Resolve `reference` once; failing means the whole playlist is unusable
    fn resolve(&self, reference: &str) -> Result<ResolvedEntries, ResolveError>;
}

impl<R: Resolver + ?Sized> Resolver for &R {
    fn resolve(&self, reference: &str) -> Result<ResolvedEntries, ResolveError> {
        (**self).resolve(reference)
    }
}

/// Parse the single json document yt-dlp prints with `--dump-single-json`.
///
/// A document without `entries` is a single video and becomes a one-entry list.
pub fn parse_playlist_json(text: &str) -> Result<ResolvedEntries, ResolveError> {
    if text.trim().is_empty() {
        return Err(ResolveError::EmptyOutput);
    }

    let mut document: Value = serde_json::from_str(text)?;

    let Some(entries) = document.get_mut("entries").map(Value::take) else {
        return Ok(vec![entry_from_value(document)]);
    };

    match entries {
        Value::Array(entries) => Ok(entries.into_iter().map(entry_from_value).collect()),
        Value::Null => Ok(Vec::new()),
        other => {
            warn!("Unexpected \"entries\" type in metadata: {other}");
            Ok(Vec::new())
        }
    }
}

fn entry_from_value(value: Value) -> Option<EntryRecord> {
    match value {
        Value::Object(_) => match serde_json::from_value(value) {
            Ok(entry) => Some(entry),
            Err(err) => {
                debug!("Unusable playlist entry: {err}");
                None
            }
        },
        _ => None,
    }
}
