/// Test utilities module for automatic cleanup and consistent test infrastructure
///
/// This module provides RAII-based cleanup that guarantees test data is removed
/// even if tests panic or fail.

use anyhow::Result;
use serde_json::Map;
use shared::{Account, Role};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

use super::account_repository::AccountRepository;
use super::mirror::FileMirror;
use super::session_repository::SessionRepository;
use super::sqlite::SqliteKeyValueStore;
use super::traits::{AccountMirror, KeyValueStore};

/// RAII Test Environment that automatically cleans up on drop
///
/// Holds a cache database and an application data directory inside one
/// temporary directory.
pub struct TestEnvironment {
    /// The temporary directory - kept alive to prevent auto-cleanup until drop
    _temp_dir: TempDir,
    /// Key-value cache shared by every repository built from this environment
    pub cache: Arc<SqliteKeyValueStore>,
    /// Application data directory the file mirror writes into
    pub data_directory: PathBuf,
    base_path: PathBuf,
}

impl TestEnvironment {
    /// Create a new test environment with automatic cleanup
    pub async fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let base_path = temp_dir.path().to_path_buf();
        let data_directory = base_path.join("app_data");
        std::fs::create_dir_all(&data_directory)?;
        let cache = Arc::new(SqliteKeyValueStore::open(base_path.join("cache.db")).await?);

        Ok(TestEnvironment {
            _temp_dir: temp_dir,
            cache,
            data_directory,
            base_path,
        })
    }

    /// Get the base directory path for this test environment
    pub fn base_directory(&self) -> &Path {
        &self.base_path
    }

    pub fn mirror(&self) -> FileMirror {
        FileMirror::new(&self.data_directory)
    }

    fn cache_handle(&self) -> Arc<dyn KeyValueStore> {
        self.cache.clone()
    }

    /// Repository writing to the cache and the file mirror
    pub fn account_repository(&self) -> AccountRepository {
        let mirror: Arc<dyn AccountMirror> = Arc::new(self.mirror());
        AccountRepository::new(self.cache_handle(), Some(mirror))
    }

    /// Repository for a shell without a desktop bridge
    pub fn account_repository_without_mirror(&self) -> AccountRepository {
        AccountRepository::new(self.cache_handle(), None)
    }

    /// Repository whose mirror directory sits below a regular file, so every
    /// mirror write fails
    pub fn account_repository_with_broken_mirror(&self) -> AccountRepository {
        let blocker = self.base_path.join("not_a_directory");
        std::fs::write(&blocker, "blocks directory creation").expect("Failed to create blocker file");
        let mirror: Arc<dyn AccountMirror> = Arc::new(FileMirror::new(blocker.join("app_data")));
        AccountRepository::new(self.cache_handle(), Some(mirror))
    }

    pub fn session_repository(&self) -> SessionRepository {
        SessionRepository::new(self.cache_handle())
    }
}

// Drop implementation ensures cleanup always happens
impl Drop for TestEnvironment {
    fn drop(&mut self) {
        // TempDir automatically cleans up when dropped
        if std::env::var("ACCOUNT_MANAGER_DEBUG_TESTS").is_ok() {
            println!("Cleaning up test environment: {:?}", self.base_path);
        }
    }
}

/// Build an account with a fixed creation timestamp
pub fn sample_account(id: &str, username: &str, password: &str, role: Role) -> Account {
    Account {
        id: id.to_string(),
        username: username.to_string(),
        password: password.to_string(),
        role,
        created_at: "2024-01-15T08:30:00.000Z".to_string(),
        extra: Map::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_environment_cleanup() -> Result<()> {
        let base_path;

        {
            let env = TestEnvironment::new().await?;
            base_path = env.base_directory().to_path_buf();

            assert!(base_path.exists());
            assert!(env.data_directory.exists());
        } // env goes out of scope here, triggering cleanup

        assert!(!base_path.exists());
        Ok(())
    }
}
