//! # IO Module
//!
//! Interface layer between the UI shell and the domain: command handlers
//! plus the mappers that turn domain results into shared DTOs.

pub mod commands;
pub mod mappers;

pub use commands::*;
