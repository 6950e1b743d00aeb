//! Read playlist references from a newline-delimited file

use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("Failed to open input file \"{}\"", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to read line {line} of the input")]
    Read {
        line: usize,
        #[source]
        source: std::io::Error,
    },
}

/// Lazy iterator over the references of a input, one per non-blank line.
///
/// Lines are trimmed. Iteration stops after the first read error.
pub struct InputReader<R> {
    lines: Lines<R>,
    line_no: usize,
    failed: bool,
}

/// Open `path` for reading references
pub fn open_input(path: &Path) -> Result<InputReader<BufReader<File>>, InputError> {
    let file = File::open(path).map_err(|source| InputError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(references_from(BufReader::new(file)))
}

/// Read references from any buffered reader
pub fn references_from<R: BufRead>(reader: R) -> InputReader<R> {
    InputReader {
        lines: reader.lines(),
        line_no: 0,
        failed: false,
    }
}

impl<R: BufRead> Iterator for InputReader<R> {
    type Item = Result<String, InputError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        loop {
            let line = self.lines.next()?;
            self.line_no += 1;

            let line = match line {
                Ok(v) => v,
                Err(source) => {
                    self.failed = true;
                    return Some(Err(InputError::Read {
                        line: self.line_no,
                        source,
                    }));
                }
            };

            let reference = line.trim();
            if reference.is_empty() {
                debug!("Skipping blank input line {}", self.line_no);
                continue;
            }

            return Some(Ok(reference.to_string()));
        }
    }
}
