//! # Commands
//!
//! Handlers the UI shell invokes. Each takes the shared `AppState` and a
//! request DTO and returns either a response DTO or the message to show the
//! user; no error leaves this layer as anything but display text.

pub mod account_commands;
pub mod logging_commands;
pub mod session_commands;
pub mod transfer_commands;

pub use account_commands::*;
pub use logging_commands::*;
pub use session_commands::*;
pub use transfer_commands::*;

use log::error;

use crate::domain::AccountError;

/// Turn a domain error into the message the UI displays
pub(crate) fn user_message(err: AccountError) -> String {
    match &err {
        AccountError::Format(detail) => {
            error!("Rejected import document: {}", detail);
            return "Import file format error".to_string();
        }
        AccountError::Storage(e) => error!("Storage failure: {:#}", e),
        _ => {}
    }
    err.to_string()
}
