//! File logging for analysis runs.
//!
//! Events go to a plain-text file so the YAML or JSON report on stdout stays
//! machine readable. Each `Comparison::run` opens a span named after the
//! comparison; in debug builds the span's close event records how long the
//! scoring and tabulation took.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

const DEFAULT_LOG_FILE: &str = "contrast-coverage.log";
const DEFAULT_LEVEL: &str = "info";

/// Filter directive limiting output to this crate at `level`.
fn crate_directive(level: &str) -> String {
    format!("{}={level}", env!("CARGO_CRATE_NAME"))
}

/// `RUST_LOG` wins when set; otherwise this crate's events at `level`.
/// An unparsable level falls back to `info`.
fn build_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(crate_directive(level)))
        .unwrap_or_else(|_| EnvFilter::new(crate_directive(DEFAULT_LEVEL)))
}

/// Install the global subscriber writing to `log_path`
/// (`contrast-coverage.log` in the working directory by default).
///
/// The returned guard flushes the non-blocking writer when dropped, so
/// `main` holds it until the reports are written.
pub fn init_logging(log_path: Option<&Path>, level: Option<&str>) -> WorkerGuard {
    let log_path = log_path.unwrap_or(Path::new(DEFAULT_LOG_FILE));
    let parent = log_path.parent().unwrap_or(Path::new("."));
    let filename = log_path
        .file_name()
        .unwrap_or_else(|| std::ffi::OsStr::new(DEFAULT_LOG_FILE));

    let (writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::never(parent, filename));

    let file_layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true);

    #[cfg(debug_assertions)]
    let file_layer = {
        use tracing_subscriber::fmt::format::FmtSpan;
        file_layer.with_span_events(FmtSpan::CLOSE)
    };

    tracing_subscriber::registry()
        .with(build_filter(level.unwrap_or(DEFAULT_LEVEL)))
        .with(file_layer)
        .init();

    guard
}
