//! Tracing subscriber setup.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::{fmt::writer::BoxMakeWriter, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Environment variable holding the log filter directives.
pub const LOG_ENV: &str = "TASKBOARD_LOG";

/// Where log lines go.
pub enum LogTarget<'a> {
    /// Plain CLI commands.
    Stderr,
    /// The board owns the terminal, so logs go to a file or nowhere.
    File(Option<&'a Path>),
}

/// Filter from `TASKBOARD_LOG`, `warn` when unset or invalid.
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
}

/// Install the global subscriber. A second call is a no-op.
pub fn init_tracing(target: LogTarget<'_>) {
    let (writer, ansi) = match target {
        LogTarget::Stderr => (BoxMakeWriter::new(std::io::stderr), true),
        LogTarget::File(Some(path)) => match OpenOptions::new().create(true).append(true).open(path) {
            Ok(file) => (BoxMakeWriter::new(Mutex::new(file)), false),
            Err(e) => {
                eprintln!("Cannot open log file {}: {e}", path.display());
                (BoxMakeWriter::new(std::io::sink), false)
            }
        },
        LogTarget::File(None) => (BoxMakeWriter::new(std::io::sink), false),
    };

    let _ = tracing_subscriber::registry()
        .with(env_filter())
        .with(tracing_subscriber::fmt::layer().with_writer(writer).with_ansi(ansi))
        .try_init();
}
