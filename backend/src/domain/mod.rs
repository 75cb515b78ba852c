//! # Domain Module
//!
//! Business rules for local account management, independent of how accounts
//! are stored and of the UI that drives them.
//!
//! ## Module Organization
//!
//! - **account_service**: the account store (list, create, delete, batch import)
//! - **session_service**: login, logout and the current-user guard
//! - **import_export_service**: export documents and import parsing
//! - **commands**: internal command and result types
//! - **models**: validation rules, errors and ID generation
//!
//! ## Business Rules
//!
//! - Usernames are unique and compared case-sensitively
//! - Passwords must be at least six characters when an account is created
//! - Imports never overwrite: a record whose username is taken is skipped
//! - Passwords are stored and compared in plain text

pub mod account_service;
pub mod commands;
pub mod import_export_service;
pub mod models;
pub mod session_service;

pub use account_service::*;
pub use import_export_service::ImportExportService;
pub use models::account::{AccountError, AccountValidationError, AuthError};
pub use session_service::*;
