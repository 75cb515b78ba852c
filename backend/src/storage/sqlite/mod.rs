//! SQLite-backed key-value cache

pub mod db;

pub use db::SqliteKeyValueStore;
