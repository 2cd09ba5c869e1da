//! File-based logging setup
//!
//! Logs go to a daily-rotated file under the XDG state directory so
//! the terminal stays clean for the recorder UI. Set RUST_LOG to adjust
//! verbosity.

use std::path::PathBuf;
use std::sync::OnceLock;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

static GUARD: OnceLock<WorkerGuard> = OnceLock::new();

/// Directory logs are written to
pub fn log_dir() -> Option<PathBuf> {
    dirs::state_dir()
        .or_else(dirs::data_local_dir)
        .map(|dir| dir.join("voicedrop").join("logs"))
}

/// Initialize file logging. Returns the log directory on success.
pub fn init() -> Result<PathBuf, String> {
    let dir = log_dir().ok_or_else(|| "Could not determine state directory".to_string())?;

    std::fs::create_dir_all(&dir)
        .map_err(|e| format!("Could not create log directory {}: {}", dir.display(), e))?;

    let appender = tracing_appender::rolling::daily(&dir, "voicedrop.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(|e| format!("Could not install logger: {}", e))?;

    // The guard must outlive the process or buffered lines are lost
    let _ = GUARD.set(guard);

    Ok(dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_dir_ends_with_app_path() {
        if let Some(dir) = log_dir() {
            assert!(dir.ends_with("voicedrop/logs"));
        }
    }
}
