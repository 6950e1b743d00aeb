use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Extra things necessary for a config file, like wrappers for versioning
pub mod config_extra;

/// The filename of the config
pub const FILE_NAME: &str = "config.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)] // allow missing fields and fill them with the `..Self::default()` in this struct
pub struct Settings {
    /// File with one playlist reference per line
    pub input_file: PathBuf,
    /// File the accepted entries are appended to, it is plain text despite the default name
    pub output_file: PathBuf,
    /// Entries whose title contains any of these (case-insensitive) are dropped
    pub keywords: Vec<String>,
    /// What to do when a whole playlist cannot be resolved
    pub on_resolve_error: OnResolveError,
    pub ytdlp: YtDlpSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            input_file: PathBuf::from("playlists.txt"),
            output_file: PathBuf::from("output.json"),
            keywords: vec!["yanni".to_string()],
            on_resolve_error: OnResolveError::default(),
            ytdlp: YtDlpSettings::default(),
        }
    }
}

impl Settings {
    /// Input path with `~` expanded
    pub fn input_path(&self) -> PathBuf {
        expand_tilde(&self.input_file)
    }

    /// Output path with `~` expanded
    pub fn output_path(&self) -> PathBuf {
        expand_tilde(&self.output_file)
    }
}

fn expand_tilde(path: &std::path::Path) -> PathBuf {
    PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).as_ref())
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OnResolveError {
    /// Stop the whole run
    #[default]
    Abort,
    /// Report the failure and continue with the next reference
    Skip,
}

impl std::fmt::Display for OnResolveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let policy = match self {
            Self::Abort => "abort",
            Self::Skip => "skip",
        };
        write!(f, "{policy}")
    }
}

impl std::str::FromStr for OnResolveError {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "abort" => Ok(Self::Abort),
            "skip" | "continue" => Ok(Self::Skip),
            other => Err(format!(
                "unknown policy \"{other}\", expected \"abort\" or \"skip\""
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)] // allow missing fields and fill them with the `..Self::default()` in this struct
pub struct YtDlpSettings {
    /// The yt-dlp program, either a name looked up in `PATH` or a path
    pub executable: String,
    /// Continue past errors of single playlist items
    pub ignore_errors: bool,
    /// Suppress yt-dlp's informational output and warnings
    pub quiet: bool,
    /// Only list the playlist entries instead of resolving every video
    pub flat_playlist: bool,
    /// Extra arguments for yt-dlp, shell-like quoting
    pub extra_args: String,
    /// Working directory for yt-dlp, defaults to the temp dir
    #[serde(skip_serializing_if = "Option::is_none")]
    pub work_dir: Option<String>,
}

impl Default for YtDlpSettings {
    fn default() -> Self {
        Self {
            executable: "yt-dlp".to_string(),
            ignore_errors: true,
            quiet: true,
            flat_playlist: true,
            extra_args: String::new(),
            work_dir: None,
        }
    }
}
