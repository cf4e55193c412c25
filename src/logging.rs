//! Tracing subscriber setup for the binary.
//!
//! Console output goes to stderr so stdout stays clean for reports. An
//! optional transcript file receives everything at debug level and above,
//! including lines relayed from the external application's log.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use crate::error::{BatchError, Result};

const TRANSCRIPT_FILTER: &str = "ps_batch_runner=debug";

/// Console filter directive for the given verbosity.
#[must_use]
pub fn console_directive(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        return "ps_batch_runner=error";
    }
    match verbose {
        0 => "ps_batch_runner=warn,ps_batch_runner::external=info",
        1 => "ps_batch_runner=info",
        2 => "ps_batch_runner=debug",
        _ => "ps_batch_runner=trace",
    }
}

/// Installs the global subscriber.
///
/// `RUST_LOG` overrides the verbosity-derived console filter. The returned
/// guard must be held until exit so the transcript is flushed.
///
/// # Errors
/// Returns an error if the transcript file's directory cannot be created.
pub fn init_logging(verbose: u8, quiet: bool, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let console_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(console_directive(verbose, quiet)));

    let mut guard = None;
    let file_layer = match log_file {
        Some(path) => {
            let (dir, name) = split_log_path(path)?;
            let appender = tracing_appender::rolling::never(dir, name);
            let (writer, worker_guard) = tracing_appender::non_blocking(appender);
            guard = Some(worker_guard);
            Some(
                tracing_subscriber::fmt::layer()
                    .with_writer(writer)
                    .with_ansi(false)
                    .with_filter(EnvFilter::new(TRANSCRIPT_FILTER)),
            )
        }
        None => None,
    };

    let console_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(console_filter);

    // A second init (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::registry()
        .with(file_layer)
        .with(console_layer)
        .try_init();

    Ok(guard)
}

fn split_log_path(path: &Path) -> Result<(&Path, &std::ffi::OsStr)> {
    let name = path
        .file_name()
        .ok_or_else(|| BatchError::Config(format!("invalid log file path: {}", path.display())))?;
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir).map_err(|e| BatchError::io(e, dir, "create"))?;
    Ok((dir, name))
}

#[cfg(test)]
#[path = "logging_tests.rs"]
mod tests;
