//! Logging setup of the binary

use std::backtrace::Backtrace;
use std::io::Write;

use anyhow::{Context, Result};
use colored::{Color, Colorize};
use flexi_logger::{style, DeferredNow, Duplicate, FileSpec, Logger, LoggerHandle, Record};

use crate::cli::LogOptions;

/// Start the logger, logs go to stderr and additionally to the log file if requested.
///
/// Level comes from `RUST_LOG`, defaulting to `warn`. Stdout is left to the progress lines.
pub fn setup(options: &LogOptions) -> Result<LoggerHandle> {
    let mut logger = Logger::try_with_env_or_str("warn")
        .context("Parsing the log specification")?
        .adaptive_format_for_stderr(flexi_logger::AdaptiveFormat::Custom(
            log_format,
            color_log_format,
        ))
        .log_to_stderr();

    if options.log_to_file {
        let filespec = FileSpec::try_from(&options.log_file)
            .with_context(|| format!("Parsing log file \"{}\"", options.log_file.display()))?;
        logger = logger
            .format_for_files(log_format)
            .log_to_file(filespec)
            .append()
            .duplicate_to_stderr(Duplicate::All);
    }

    let handle = logger.start().context("Starting the logger")?;
    if options.log_to_file {
        info!("Logging to file \"{}\"", options.log_file.display());
    }

    let previous_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        // runs before unwinding, so the backtrace still points at the panic
        error!("Panic: {panic}\n{}", Backtrace::capture());
        previous_hook(panic);
    }));

    Ok(handle)
}

/// Plain format, used for the log file and non-tty stderr
///
/// `2024-05-01T10:00:00.000+02:00 WARN  plfilterlib::pipeline: message`
pub fn log_format(
    w: &mut dyn Write,
    now: &mut DeferredNow,
    record: &Record<'_>,
) -> Result<(), std::io::Error> {
    write!(
        w,
        "{} {:5} {}: {}",
        now.format_rfc3339(),
        record.level(),
        record.target(),
        record.args()
    )
}

/// Same layout as [`log_format`] with a dimmed time and colored level, for a tty
pub fn color_log_format(
    w: &mut dyn Write,
    now: &mut DeferredNow,
    record: &Record<'_>,
) -> Result<(), std::io::Error> {
    let level = record.level();
    write!(
        w,
        "{} {} {}: {}",
        now.format_rfc3339().color(Color::BrightBlack),
        // padded before painting, the escape codes would count towards the width
        style(level).paint(format!("{level:5}")),
        record.target(),
        record.args()
    )
}
