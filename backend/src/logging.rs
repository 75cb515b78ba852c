//! Logging setup and forwarding of UI log lines.

use log::{Level, LevelFilter};
use shared::LogEntry;
use std::str::FromStr;

/// Target used for lines forwarded from the UI
pub const FRONTEND_TARGET: &str = "frontend";

/// Install the process logger. `RUST_LOG` overrides `level`.
/// Calling this more than once is harmless.
pub fn init_logging(level: LevelFilter) {
    let _ = env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp_millis()
        .try_init();
}

/// Level for a UI log entry; unknown names log at info
pub fn frontend_level(name: &str) -> Level {
    Level::from_str(name.trim()).unwrap_or(Level::Info)
}

/// Write a UI log entry into the backend log
pub fn log_frontend_entry(entry: &LogEntry) {
    let level = frontend_level(&entry.level);
    match &entry.timestamp {
        Some(timestamp) => log::log!(target: FRONTEND_TARGET, level, "[{}] {}", timestamp, entry.message),
        None => log::log!(target: FRONTEND_TARGET, level, "{}", entry.message),
    }
}
