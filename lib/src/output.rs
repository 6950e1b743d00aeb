//! Append accepted entries to the output file
//!
//! Each record is a blank line followed by `ID: <id> - Title: <title>`, without a
//! trailing newline. The file is only ever appended to, running twice on the
//! same input duplicates the records.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

use crate::entry::EntryRecord;

/// Format the record line of `entry`, without the separating blank line
pub fn format_record(entry: &EntryRecord) -> String {
    format!("ID: {} - Title: {}", entry.id(), entry.title())
}

#[derive(Debug)]
pub struct OutputWriter<W: Write> {
    sink: W,
}

/// Open (or create) `path` in append mode
pub fn open_output(path: &Path) -> io::Result<OutputWriter<File>> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    Ok(OutputWriter::new(file))
}

impl<W: Write> OutputWriter<W> {
    pub fn new(sink: W) -> Self {
        Self { sink }
    }

    /// Write one record and flush it, so it survives a interrupted run
    pub fn write_record(&mut self, entry: &EntryRecord) -> io::Result<()> {
        self.sink.write_all(b"\n")?;
        self.sink.write_all(format_record(entry).as_bytes())?;
        self.sink.flush()
    }

    pub fn into_inner(self) -> W {
        self.sink
    }
}
