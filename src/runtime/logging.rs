use std::fs;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::config::{self, LogSettings};

const LOG_FILE: &str = "murmur.log";

/// Send `tracing` output to a log file, since the terminal belongs to the UI.
///
/// Returns the writer guard, which must be kept alive until exit. Returns
/// `None` (and logs nothing) when no log directory can be created.
pub fn init(settings: &LogSettings) -> Option<WorkerGuard> {
    let dir = settings.directory.clone().or_else(config::default_log_dir)?;
    if let Err(e) = fs::create_dir_all(&dir) {
        eprintln!("murmur: cannot create log directory {}: {e}", dir.display());
        return None;
    }

    let appender = tracing_appender::rolling::never(&dir, LOG_FILE);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&settings.filter));

    tracing_subscriber::fmt()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .with_env_filter(filter)
        .try_init()
        .ok()?;

    Some(guard)
}
