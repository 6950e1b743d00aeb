//! The single linear pass: read references, resolve, filter, append

use std::io::Write;

use anyhow::{Context, Result};

use crate::config::{OnResolveError, Settings};
use crate::entry::EntryRecord;
use crate::filter::{Decision, KeywordFilter};
use crate::input::open_input;
use crate::output::{open_output, OutputWriter};
use crate::resolver::Resolver;

/// Counters of a run, only logged, never printed as a summary
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunReport {
    pub references: usize,
    /// References that failed to resolve and were skipped
    pub failed_references: usize,
    pub accepted: usize,
    pub rejected: usize,
    /// Entries the resolver could not resolve
    pub unresolved_entries: usize,
}

pub struct Pipeline<R, W: Write, P: Write> {
    resolver: R,
    filter: KeywordFilter,
    output: OutputWriter<W>,
    /// User-visible progress lines
    progress: P,
    on_resolve_error: OnResolveError,
    report: RunReport,
}

impl<R: Resolver, W: Write, P: Write> Pipeline<R, W, P> {
    pub fn new(
        resolver: R,
        filter: KeywordFilter,
        output: OutputWriter<W>,
        progress: P,
        on_resolve_error: OnResolveError,
    ) -> Self {
        Self {
            resolver,
            filter,
            output,
            progress,
            on_resolve_error,
            report: RunReport::default(),
        }
    }

    /// Resolve one reference and handle all of its entries
    pub fn process_reference(&mut self, reference: &str) -> Result<()> {
        self.report.references += 1;
        writeln!(self.progress, "{reference}")?;

        let entries = match self.resolver.resolve(reference) {
            Ok(v) => v,
            Err(err) => match self.on_resolve_error {
                OnResolveError::Abort => {
                    return Err(err).with_context(|| format!("Failed to resolve \"{reference}\""));
                }
                OnResolveError::Skip => {
                    error!("Failed to resolve \"{reference}\", skipping: {err:#}");
                    writeln!(self.progress, "failed to resolve {reference}: {err}")?;
                    self.report.failed_references += 1;
                    return Ok(());
                }
            },
        };

        debug!("\"{reference}\" resolved to {} entries", entries.len());

        for entry in entries {
            let Some(entry) = entry else {
                self.report.unresolved_entries += 1;
                continue;
            };
            self.process_entry(&entry)?;
        }

        Ok(())
    }

    fn process_entry(&mut self, entry: &EntryRecord) -> Result<()> {
        let title = entry.title();
        match self.filter.check(&title) {
            Decision::Reject { keyword } => {
                info!("Ignoring \"{title}\", matched keyword \"{keyword}\"");
                writeln!(self.progress, "video {title} has been ignored")?;
                self.report.rejected += 1;
            }
            Decision::Accept => {
                self.output
                    .write_record(entry)
                    .context("Failed to write to the output file")?;
                self.report.accepted += 1;
            }
        }

        Ok(())
    }

    pub fn report(&self) -> RunReport {
        self.report
    }

    /// Give back the output and progress sinks
    pub fn into_parts(self) -> (OutputWriter<W>, P) {
        (self.output, self.progress)
    }
}

/// Process every reference of the input file configured in `settings`.
///
/// The input is opened first (missing input is fatal before anything is written),
/// then the output is opened in append mode for the whole run. Both are closed on
/// every exit path.
pub fn run<R: Resolver, P: Write>(settings: &Settings, resolver: R, progress: P) -> Result<RunReport> {
    let references = open_input(&settings.input_path())?;

    let output_path = settings.output_path();
    let output = open_output(&output_path)
        .with_context(|| format!("Failed to open output file \"{}\"", output_path.display()))?;

    let mut pipeline = Pipeline::new(
        resolver,
        KeywordFilter::new(&settings.keywords),
        output,
        progress,
        settings.on_resolve_error,
    );

    for reference in references {
        pipeline.process_reference(&reference?)?;
    }

    let report = pipeline.report();
    debug!("Finished: {report:?}");

    Ok(report)
}
