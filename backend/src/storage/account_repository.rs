use anyhow::{Context, Result};
use log::{debug, info, warn};
use shared::Account;
use std::sync::Arc;

use super::traits::{AccountMirror, KeyValueStore};
use super::ACCOUNTS_KEY;

/// What happened to the mirror copy during a save
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MirrorStatus {
    /// The mirror now matches the cache
    Written,
    /// No mirror is configured (web build without a desktop bridge)
    Disabled,
    /// The mirror write failed; the cache is still up to date
    Failed,
}

/// Reads and writes the whole account list.
///
/// The cache is authoritative. Every save rewrites the full list there and
/// then copies it to the mirror on a best-effort basis: mirror errors are
/// logged and reported as `MirrorStatus::Failed`, never returned as errors.
#[derive(Clone)]
pub struct AccountRepository {
    cache: Arc<dyn KeyValueStore>,
    mirror: Option<Arc<dyn AccountMirror>>,
}

impl AccountRepository {
    pub fn new(cache: Arc<dyn KeyValueStore>, mirror: Option<Arc<dyn AccountMirror>>) -> Self {
        Self { cache, mirror }
    }

    pub fn has_mirror(&self) -> bool {
        self.mirror.is_some()
    }

    /// Load all accounts in insertion order
    pub async fn load_accounts(&self) -> Result<Vec<Account>> {
        match self.cache.get_value(ACCOUNTS_KEY).await? {
            Some(json) => serde_json::from_str(&json).context("Cached account list is malformed"),
            None => Ok(Vec::new()),
        }
    }

    /// Replace the stored list with `accounts`
    pub async fn save_accounts(&self, accounts: &[Account]) -> Result<MirrorStatus> {
        let json = serde_json::to_string(accounts)?;
        self.cache.put_value(ACCOUNTS_KEY, &json).await?;
        debug!("Saved {} accounts to cache", accounts.len());

        Ok(self.sync_mirror(accounts).await)
    }

    /// Copy `accounts` to the mirror, swallowing any failure
    pub async fn sync_mirror(&self, accounts: &[Account]) -> MirrorStatus {
        let mirror = match &self.mirror {
            Some(mirror) => mirror,
            None => return MirrorStatus::Disabled,
        };

        match mirror.write_accounts(accounts).await {
            Ok(()) => MirrorStatus::Written,
            Err(e) => {
                warn!("Failed to write account mirror {}: {:#}", mirror.location(), e);
                MirrorStatus::Failed
            }
        }
    }

    /// Copy the mirror's account list into the cache.
    ///
    /// Run once at startup so a desktop install picks up the durable copy.
    /// Returns the number of accounts copied, or None when there was nothing
    /// to copy (no mirror, no file, or an unreadable file).
    pub async fn hydrate_from_mirror(&self) -> Result<Option<usize>> {
        let mirror = match &self.mirror {
            Some(mirror) => mirror,
            None => return Ok(None),
        };

        let accounts = match mirror.read_accounts().await {
            Ok(Some(accounts)) => accounts,
            Ok(None) => {
                debug!("Mirror {} has no accounts yet", mirror.location());
                return Ok(None);
            }
            Err(e) => {
                warn!("Ignoring unreadable account mirror {}: {:#}", mirror.location(), e);
                return Ok(None);
            }
        };

        let json = serde_json::to_string(&accounts)?;
        self.cache.put_value(ACCOUNTS_KEY, &json).await?;
        info!("Loaded {} accounts from mirror {}", accounts.len(), mirror.location());
        Ok(Some(accounts.len()))
    }
}
