//! # Storage Traits
//!
//! Storage abstractions the repositories are written against, so the cache
//! and the mirror can be swapped without touching the domain layer.

use anyhow::Result;
use async_trait::async_trait;
use shared::Account;

/// String key-value store backing all reads and writes
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Retrieve a value by its key
    async fn get_value(&self, key: &str) -> Result<Option<String>>;

    /// Store a value, overwriting any existing value for the same key
    async fn put_value(&self, key: &str, value: &str) -> Result<()>;

    /// Delete a value by its key
    /// Returns true if the key existed
    async fn delete_value(&self, key: &str) -> Result<bool>;
}

/// Durable secondary copy of the account list
#[async_trait]
pub trait AccountMirror: Send + Sync {
    /// Replace the mirrored list with `accounts`
    async fn write_accounts(&self, accounts: &[Account]) -> Result<()>;

    /// Read the mirrored list
    /// Returns None if nothing has been mirrored yet
    async fn read_accounts(&self) -> Result<Option<Vec<Account>>>;

    /// Where the mirror lives, for log lines
    fn location(&self) -> String;
}
