//! Console and file logging setup.
//!
//! Operator-facing lines go to the console (default `info`, overridable with
//! `RUST_LOG`); a verbose `debug` stream is appended to `app.log` for
//! postmortems.

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

const LOG_FILE: &str = "app.log";

/// Install the global subscriber.
///
/// The returned guard must stay alive for the lifetime of the process;
/// dropping it early loses buffered file lines.
pub fn init() -> anyhow::Result<WorkerGuard> {
    let file_appender = RollingFileAppender::new(Rotation::NEVER, ".", LOG_FILE);
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_filter(console_filter))
        .with(
            fmt::layer()
                .with_writer(file_writer)
                .with_ansi(false)
                .with_filter(EnvFilter::new("debug")),
        )
        .try_init()?;

    Ok(guard)
}
