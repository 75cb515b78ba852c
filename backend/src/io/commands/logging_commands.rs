use shared::LogEntry;

use crate::logging::log_frontend_entry;

/// Forward a UI log line into the backend log
pub fn log_message(log_entry: LogEntry) -> Result<(), String> {
    log_frontend_entry(&log_entry);
    Ok(())
}
