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
use std::path::PathBuf;
use std::process::{Command, Stdio};

use anyhow::{Context, Result};

use super::{parse_playlist_json, ResolveError, ResolvedEntries, Resolver};
use crate::config::YtDlpSettings;

/// Resolves references by running `yt-dlp --dump-single-json`, never downloading media
#[derive(Debug, Clone)]
pub struct YtDlpResolver {
    executable: String,
    /// Arguments in the order they are passed, with their value if they take one
    args: Vec<(String, Option<String>)>,
    work_dir: PathBuf,
}

impl YtDlpResolver {
    pub fn new(settings: &YtDlpSettings) -> Result<Self> {
        let mut args = vec![
            ("--dump-single-json".to_string(), None),
            ("--skip-download".to_string(), None),
            ("--no-progress".to_string(), None),
        ];
        if settings.ignore_errors {
            args.push(("--ignore-errors".to_string(), None));
        }
        if settings.quiet {
            args.push(("--quiet".to_string(), None));
            args.push(("--no-warnings".to_string(), None));
        }
        if settings.flat_playlist {
            args.push(("--flat-playlist".to_string(), None));
        }

        let extra_args = parse_args(&settings.extra_args)
            .context("Parsing config `ytdlp.extra_args`")?;
        args.extend(convert_to_args(extra_args));

        let work_dir = settings
            .work_dir
            .as_ref()
            .map_or_else(std::env::temp_dir, |dir| {
                PathBuf::from(shellexpand::tilde(dir).as_ref())
            });

        Ok(Self {
            executable: shellexpand::tilde(&settings.executable).into_owned(),
            args,
            work_dir,
        })
    }

    /// All arguments in the order they are passed to yt-dlp, without the reference
    pub fn args(&self) -> Vec<&str> {
        self.args
            .iter()
            .flat_map(|(name, value)| std::iter::once(name.as_str()).chain(value.as_deref()))
            .collect()
    }
}

impl Resolver for YtDlpResolver {
    fn resolve(&self, reference: &str) -> Result<ResolvedEntries, ResolveError> {
        let output = Command::new(&self.executable)
            .args(self.args())
            .arg("--")
            .arg(reference)
            .current_dir(&self.work_dir)
            .stdin(Stdio::null())
            .output()
            .map_err(|err| {
                ResolveError::Ytdlp(format!("failed to start \"{}\": {err}", self.executable))
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        if output.status.success() {
            return parse_playlist_json(&stdout);
        }

        // with `--ignore-errors` yt-dlp still exits non-zero when single items failed,
        // the playlist document on stdout is usable nonetheless
        let stderr = String::from_utf8_lossy(&output.stderr);
        let stderr = stderr.trim();
        if stdout.trim().is_empty() {
            return Err(ResolveError::Ytdlp(format!("{}: {stderr}", output.status)));
        }

        match parse_playlist_json(&stdout) {
            Ok(entries) => {
                warn!("yt-dlp reported errors for \"{reference}\", using the partial result: {stderr}");
                Ok(entries)
            }
            Err(err) => {
                debug!("Unusable output of failed yt-dlp run: {err}");
                Err(ResolveError::Ytdlp(format!("{}: {stderr}", output.status)))
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum ArgOrVal {
    ArgumentWithVal(String),
    Flag(String),
    Argument(String),
    Positional(String),
}

/// Parse the input shell-like string into a Vector of `argument` and `maybe argument value`.
fn parse_args(input: &str) -> Result<Vec<ArgOrVal>, shell_words::ParseError> {
    let result = shell_words::split(input)?
        .into_iter()
        .map(|token| {
            if token.starts_with("--") {
                if token.contains('=') {
                    ArgOrVal::ArgumentWithVal(token)
                } else {
                    ArgOrVal::Argument(token)
                }
            } else if token.starts_with('-') {
                ArgOrVal::Flag(token)
            } else {
                ArgOrVal::Positional(token)
            }
        })
        .collect();
    Ok(result)
}

/// Pair up long arguments with the positional that follows them, keeping their order.
fn convert_to_args(extra_args: Vec<ArgOrVal>) -> Vec<(String, Option<String>)> {
    let mut parsed = Vec::with_capacity(extra_args.len());

    // a long argument that may still receive a value
    let mut last_arg: Option<String> = None;

    for val in extra_args {
        match val {
            ArgOrVal::ArgumentWithVal(v) | ArgOrVal::Flag(v) => {
                if let Some(prev) = last_arg.take() {
                    parsed.push((prev, None));
                }
                parsed.push((v, None));
            }
            ArgOrVal::Argument(v) => {
                if let Some(prev) = last_arg.replace(v) {
                    parsed.push((prev, None));
                }
            }
            ArgOrVal::Positional(v) => {
                let Some(arg) = last_arg.take() else {
                    error!("Positional without previous argument, ignoring: {v:#?}");
                    continue;
                };
                parsed.push((arg, Some(v)));
            }
        }
    }

    if let Some(remainder) = last_arg {
        parsed.push((remainder, None));
    }

    parsed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::EntryRecord;
    use pretty_assertions::assert_eq;

    #[test]
    fn should_parse_extra_args() {
        let args = parse_args(r#"--cookies "my cookies.txt" -4 --playlist-items=1-5 --no-cache-dir"#)
            .unwrap();
        assert_eq!(
            args,
            vec![
                ArgOrVal::Argument("--cookies".to_string()),
                ArgOrVal::Positional("my cookies.txt".to_string()),
                ArgOrVal::Flag("-4".to_string()),
                ArgOrVal::ArgumentWithVal("--playlist-items=1-5".to_string()),
                ArgOrVal::Argument("--no-cache-dir".to_string()),
            ]
        );

        assert!(parse_args(r#"--cookies "unterminated"#).is_err());
    }

    #[test]
    fn should_pair_arguments() {
        let args = parse_args("--proxy socks5://127.0.0.1 --no-cache-dir --verbose stray -4 --last")
            .unwrap();
        assert_eq!(
            convert_to_args(args),
            vec![
                (
                    "--proxy".to_string(),
                    Some("socks5://127.0.0.1".to_string())
                ),
                ("--no-cache-dir".to_string(), None),
                ("--verbose".to_string(), Some("stray".to_string())),
                ("-4".to_string(), None),
                ("--last".to_string(), None),
            ]
        );

        // positional without argument is dropped
        let args = parse_args("orphan --flat").unwrap();
        assert_eq!(convert_to_args(args), vec![("--flat".to_string(), None)]);
    }

    #[test]
    fn should_keep_argument_order() {
        let settings = YtDlpSettings {
            ignore_errors: true,
            quiet: false,
            flat_playlist: true,
            extra_args: "--cookies c.txt --no-cache-dir --playlist-items 1-3".to_string(),
            work_dir: Some("/tmp".to_string()),
            ..YtDlpSettings::default()
        };
        let resolver = YtDlpResolver::new(&settings).unwrap();

        assert_eq!(
            resolver.args(),
            vec![
                "--dump-single-json",
                "--skip-download",
                "--no-progress",
                "--ignore-errors",
                "--flat-playlist",
                "--cookies",
                "c.txt",
                "--no-cache-dir",
                "--playlist-items",
                "1-3",
            ]
        );
        assert_eq!(resolver.work_dir, PathBuf::from("/tmp"));
        assert_eq!(resolver.executable, "yt-dlp");
    }

    #[test]
    fn quiet_adds_both_flags() {
        let settings = YtDlpSettings {
            ignore_errors: false,
            quiet: true,
            flat_playlist: false,
            ..YtDlpSettings::default()
        };
        let resolver = YtDlpResolver::new(&settings).unwrap();
        let args = resolver.args();

        assert!(args.contains(&"--quiet"));
        assert!(args.contains(&"--no-warnings"));
        assert!(!args.contains(&"--ignore-errors"));
        assert!(!args.contains(&"--flat-playlist"));
        assert_eq!(resolver.work_dir, std::env::temp_dir());
    }

    /// Write a shell script standing in for yt-dlp and build a resolver running it
    #[cfg(unix)]
    fn fake_ytdlp(dir: &std::path::Path, script: &str) -> YtDlpResolver {
        use std::os::unix::fs::PermissionsExt;

        let path = dir.join("yt-dlp");
        std::fs::write(&path, format!("#!/bin/sh\n{script}")).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();

        YtDlpResolver::new(&YtDlpSettings {
            executable: path.to_string_lossy().into_owned(),
            flat_playlist: false,
            ..YtDlpSettings::default()
        })
        .unwrap()
    }

    #[cfg(unix)]
    #[test]
    fn failed_items_keep_the_playlist() {
        let dir = tempfile::tempdir().unwrap();
        let resolver = fake_ytdlp(
            dir.path(),
            r#"printf '%s' '{"_type":"playlist","entries":[null,{"id":"a2","title":"Relaxing Piano"}]}'
echo 'ERROR: [youtube] a1: Private video' >&2
exit 1
"#,
        );

        let entries = resolver
            .resolve("https://www.youtube.com/playlist?list=PL1")
            .unwrap();
        assert_eq!(
            entries,
            vec![None, Some(EntryRecord::new("a2", "Relaxing Piano"))]
        );
    }

    #[cfg(unix)]
    #[test]
    fn failure_without_document_fails_reference() {
        let dir = tempfile::tempdir().unwrap();
        let resolver = fake_ytdlp(
            dir.path(),
            "echo 'ERROR: Unsupported URL: nope' >&2\nexit 1\n",
        );

        match resolver.resolve("nope") {
            Err(ResolveError::Ytdlp(msg)) => assert!(msg.contains("Unsupported URL")),
            other => panic!("expected yt-dlp error, got {other:?}"),
        }

        let resolver = fake_ytdlp(dir.path(), "echo 'WARNING: half a line'\nexit 2\n");
        assert!(matches!(
            resolver.resolve("nope"),
            Err(ResolveError::Ytdlp(_))
        ));
    }

    #[cfg(unix)]
    #[test]
    fn should_pass_reference_last() {
        let dir = tempfile::tempdir().unwrap();
        // echo the last argument back as the title of a single video
        let resolver = fake_ytdlp(
            dir.path(),
            r#"for last; do :; done
printf '{"id": "v1", "title": "%s"}' "$last"
"#,
        );

        let entries = resolver.resolve("-weird-ref").unwrap();
        assert_eq!(entries, vec![Some(EntryRecord::new("v1", "-weird-ref"))]);
    }

    #[test]
    fn missing_executable_fails_reference() {
        let resolver = YtDlpResolver::new(&YtDlpSettings {
            executable: "/nonexistent/plfilter/yt-dlp".to_string(),
            ..YtDlpSettings::default()
        })
        .unwrap();

        assert!(matches!(
            resolver.resolve("https://www.youtube.com/playlist?list=PL1"),
            Err(ResolveError::Ytdlp(_))
        ));
    }
}
