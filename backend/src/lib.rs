//! # Account Manager Backend
//!
//! Contains all non-UI logic for the animal hospital account screen.
//!
//! This crate brings together:
//! - **Domain**: account store, session holder and import/export rules
//! - **Storage**: key-value cache plus the optional `accounts.json` mirror
//! - **IO**: command handlers the UI shell calls
//!
//! ## Architecture
//!
//! ```text
//! UI shell (pages, dialogs)
//!     ↓
//! IO Layer (commands, mappers)
//!     ↓
//! Domain Layer (services)
//!     ↓
//! Storage Layer (cache, mirror)
//! ```

pub mod config;
pub mod domain;
pub mod io;
pub mod logging;
pub mod storage;

use anyhow::{Context, Result};
use log::info;
use std::sync::Arc;

use crate::config::AppConfig;
use crate::domain::{AccountService, ImportExportService, SessionService};
use crate::storage::{
    AccountMirror, AccountRepository, FileMirror, KeyValueStore, SessionRepository,
    SqliteKeyValueStore,
};

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    pub account_service: AccountService,
    pub session_service: SessionService,
    pub import_export_service: ImportExportService,
}

impl AppState {
    /// Wire the services over an already-open cache and optional mirror
    pub fn new(cache: Arc<dyn KeyValueStore>, mirror: Option<Arc<dyn AccountMirror>>) -> Self {
        let account_repository = AccountRepository::new(cache.clone(), mirror);
        let session_repository = SessionRepository::new(cache);

        let account_service = AccountService::new(account_repository);
        let session_service = SessionService::new(account_service.clone(), session_repository);
        let import_export_service = ImportExportService::new(account_service.clone());

        Self {
            account_service,
            session_service,
            import_export_service,
        }
    }
}

/// Initialize the backend with all required services
pub async fn initialize_backend(config: &AppConfig) -> Result<AppState> {
    info!("Setting up data directory {}", config.data_directory.display());
    tokio::fs::create_dir_all(&config.data_directory)
        .await
        .with_context(|| format!("Failed to create data directory {}", config.data_directory.display()))?;

    info!("Setting up key-value cache");
    let cache: Arc<dyn KeyValueStore> = Arc::new(SqliteKeyValueStore::open(config.cache_path()).await?);

    let mirror: Option<Arc<dyn AccountMirror>> = if config.mirror_enabled {
        Some(Arc::new(FileMirror::new(&config.data_directory)))
    } else {
        info!("Account mirror disabled");
        None
    };

    let account_repository = AccountRepository::new(cache.clone(), mirror.clone());
    if let Some(count) = account_repository.hydrate_from_mirror().await? {
        info!("Restored {} accounts from mirror", count);
    }

    info!("Setting up application state");
    Ok(AppState::new(cache, mirror))
}
