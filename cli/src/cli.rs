use std::path::PathBuf;

/**
 * MIT License
 *
 * plfilter - Copyright (c) 2024 plfilter contributors
 *
 * Permission is hereby granted, free of charge, to any person obtaining a copy
 * of this software and associated documentation files (the "Software"), to deal
 * in the Software without restriction, including without limitation the rights
 * to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
 * copies of the Software, and to permit persons to whom the Software is
 * furnished to do so, subject to the following conditions:
 *
 * The above copyright notice and this permission notice shall be included in all
 * copies or substantial portions of the Software.
 *
 * THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
 * IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
 * FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
 * AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
 * LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
 * OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
 * SOFTWARE.
 */
use clap::{builder::ArgPredicate, Parser, Subcommand};
use plfilterlib::config::OnResolveError;

#[derive(Parser, Debug)]
#[clap(name = "plfilter", author, version, about, long_about=None)] // Read from `Cargo.toml`
pub struct Args {
    #[command(subcommand)]
    pub action: Option<Action>,
    /// File with one playlist url per line,
    /// default is `playlists.txt` or `input_file` from the config.
    pub input: Option<PathBuf>,
    /// File to append accepted entries to, default is `output.json`.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
    /// Blocked keyword, can be given multiple times. Replaces the keywords from the config.
    #[arg(short = 'k', long = "keyword", value_name = "WORD")]
    pub keywords: Vec<String>,
    /// What to do when a whole playlist fails to resolve: "abort" or "skip".
    #[arg(long, value_name = "POLICY")]
    pub on_resolve_error: Option<OnResolveError>,
    /// Use this config file instead of `~/.config/plfilter/config.toml`.
    #[arg(short, long, value_name = "FILE", env = "PLFILTER_CONFIG")]
    pub config: Option<PathBuf>,
    #[clap(flatten)]
    pub log_options: LogOptions,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Action {
    /// Write a config file with the default values.
    InitConfig {
        /// Where to write, default is `~/.config/plfilter/config.toml`.
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,
        /// Replace the file if it exists.
        #[arg(short, long)]
        force: bool,
    },
}

const DEFAULT_LOGFILE_FILENAME: &str = "plfilter.log";

#[derive(Debug, Parser, Clone, PartialEq)]
pub struct LogOptions {
    /// Enable logging to a file,
    /// automatically enabled if "log-file" is manually set
    #[arg(
        long = "log-to-file",
        default_value_if("log_file", ArgPredicate::IsPresent, "true")
    )]
    pub log_to_file: bool,

    /// Set logging file
    #[arg(long = "log-file", default_value_os_t = default_logfile_path(), env = "PLFILTER_LOGFILE")]
    pub log_file: PathBuf,
}

fn default_logfile_path() -> PathBuf {
    std::env::temp_dir().join(DEFAULT_LOGFILE_FILENAME)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn should_parse_overrides() {
        let args = Args::try_parse_from([
            "plfilter",
            "lists.txt",
            "-o",
            "accepted.txt",
            "-k",
            "yanni",
            "--keyword",
            "Live",
            "--on-resolve-error",
            "skip",
        ])
        .unwrap();

        assert_eq!(args.action, None);
        assert_eq!(args.input, Some(PathBuf::from("lists.txt")));
        assert_eq!(args.output, Some(PathBuf::from("accepted.txt")));
        assert_eq!(args.keywords, vec!["yanni".to_string(), "Live".to_string()]);
        assert_eq!(args.on_resolve_error, Some(OnResolveError::Skip));
    }

    #[test]
    fn should_reject_unknown_policy() {
        assert!(Args::try_parse_from(["plfilter", "--on-resolve-error", "retry"]).is_err());
    }

    #[test]
    fn should_parse_init_config() {
        let args = Args::try_parse_from(["plfilter", "init-config", "/tmp/plfilter.toml", "-f"])
            .unwrap();
        assert_eq!(
            args.action,
            Some(Action::InitConfig {
                file: Some(PathBuf::from("/tmp/plfilter.toml")),
                force: true
            })
        );
    }

    #[test]
    fn log_file_enables_file_logging() {
        let args = Args::try_parse_from(["plfilter", "--log-file", "/tmp/x.log"]).unwrap();
        assert!(args.log_options.log_to_file);
        assert_eq!(args.log_options.log_file, PathBuf::from("/tmp/x.log"));
    }
}
