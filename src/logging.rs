use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

pub const LOG_FILE: &str = "typetick.log";

/// Environment variable holding the log filter, e.g. `TYPETICK_LOG=debug`.
pub const LOG_ENV: &str = "TYPETICK_LOG";

/// Install a file-backed subscriber so log lines never reach the terminal UI.
///
/// The returned guard flushes the writer when dropped and must live as long
/// as the program. Returns `None` if the directory cannot be created or a
/// subscriber is already installed.
pub fn init(log_dir: &Path) -> Option<WorkerGuard> {
    std::fs::create_dir_all(log_dir).ok()?;

    let file_appender = tracing_appender::rolling::never(log_dir, LOG_FILE);
    let (writer, guard) = tracing_appender::non_blocking(file_appender);
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .ok()?;

    Some(guard)
}
