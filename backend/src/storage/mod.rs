//! # Storage Module
//!
//! Handles all data persistence for the account manager.
//!
//! Accounts are kept in two places:
//!
//! - **Key-value cache**: the primary store every read goes to. It plays the
//!   role browser `localStorage` plays for the web build and is backed by a
//!   small SQLite table.
//! - **File mirror**: an optional `accounts.json` copy in the application data
//!   directory, rewritten after every mutation. Mirror failures are logged and
//!   never fail the operation that triggered them.
//!
//! The current session lives in the cache only, under its own key.
//!
//! ## Design Principles
//!
//! - **Repository Pattern**: services talk to `AccountRepository` and
//!   `SessionRepository`, never to SQLite or the filesystem directly
//! - **Dependency Inversion**: repositories depend on the `KeyValueStore` and
//!   `AccountMirror` traits so tests and other shells can swap backends

pub mod account_repository;
pub mod mirror;
pub mod session_repository;
pub mod sqlite;
pub mod traits;

#[cfg(test)]
pub mod test_utils;

pub use account_repository::{AccountRepository, MirrorStatus};
pub use mirror::FileMirror;
pub use session_repository::SessionRepository;
pub use sqlite::SqliteKeyValueStore;
pub use traits::{AccountMirror, KeyValueStore};

/// Cache key holding the JSON array of accounts
pub const ACCOUNTS_KEY: &str = "animal_hospital_accounts";

/// Cache key holding the JSON object of the logged-in account
pub const CURRENT_USER_KEY: &str = "animal_hospital_current_user";

/// File name of the mirror inside the application data directory
pub const MIRROR_FILE_NAME: &str = "accounts.json";
