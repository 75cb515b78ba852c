//! # File Mirror
//!
//! Writes the account list to `accounts.json` in the application data
//! directory. The file holds a single object keyed like the cache entry:
//!
//! ```json
//! {
//!   "animal_hospital_accounts": [ ... ]
//! }
//! ```

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::{debug, info};
use serde_json::Value;
use shared::Account;
use std::path::{Path, PathBuf};
use tokio::fs;

use super::traits::AccountMirror;
use super::{ACCOUNTS_KEY, MIRROR_FILE_NAME};

/// Mirror stored as a pretty-printed JSON file
#[derive(Clone, Debug)]
pub struct FileMirror {
    directory: PathBuf,
}

impl FileMirror {
    /// Mirror into `directory`, which is created on first write if missing
    pub fn new<P: AsRef<Path>>(directory: P) -> Self {
        Self {
            directory: directory.as_ref().to_path_buf(),
        }
    }

    /// Full path of the mirror file
    pub fn file_path(&self) -> PathBuf {
        self.directory.join(MIRROR_FILE_NAME)
    }
}

#[async_trait]
impl AccountMirror for FileMirror {
    async fn write_accounts(&self, accounts: &[Account]) -> Result<()> {
        if !fs::try_exists(&self.directory).await.unwrap_or(false) {
            fs::create_dir_all(&self.directory)
                .await
                .with_context(|| format!("Failed to create mirror directory {}", self.directory.display()))?;
            info!("Created mirror directory: {}", self.directory.display());
        }

        let mut document = serde_json::Map::new();
        document.insert(ACCOUNTS_KEY.to_string(), serde_json::to_value(accounts)?);
        let content = serde_json::to_string_pretty(&Value::Object(document))?;

        // Atomic write using temp file
        let path = self.file_path();
        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, content)
            .await
            .with_context(|| format!("Failed to write {}", temp_path.display()))?;
        fs::rename(&temp_path, &path)
            .await
            .with_context(|| format!("Failed to replace {}", path.display()))?;

        debug!("Mirrored {} accounts to {}", accounts.len(), path.display());
        Ok(())
    }

    async fn read_accounts(&self) -> Result<Option<Vec<Account>>> {
        let path = self.file_path();
        if !fs::try_exists(&path).await.unwrap_or(false) {
            debug!("No mirror file at {}", path.display());
            return Ok(None);
        }

        let content = fs::read_to_string(&path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let mut document: Value = serde_json::from_str(&content)
            .with_context(|| format!("Mirror file {} is not valid JSON", path.display()))?;

        match document.get_mut(ACCOUNTS_KEY).map(Value::take) {
            Some(accounts) => {
                let accounts: Vec<Account> = serde_json::from_value(accounts)
                    .with_context(|| format!("Mirror file {} has malformed accounts", path.display()))?;
                Ok(Some(accounts))
            }
            None => Ok(None),
        }
    }

    fn location(&self) -> String {
        self.file_path().display().to_string()
    }
}
