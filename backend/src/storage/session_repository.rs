use anyhow::{Context, Result};
use log::debug;
use shared::Account;
use std::sync::Arc;

use super::traits::KeyValueStore;
use super::CURRENT_USER_KEY;

/// Persists the logged-in account under the session key of the cache
#[derive(Clone)]
pub struct SessionRepository {
    cache: Arc<dyn KeyValueStore>,
}

impl SessionRepository {
    pub fn new(cache: Arc<dyn KeyValueStore>) -> Self {
        Self { cache }
    }

    pub async fn get_current_user(&self) -> Result<Option<Account>> {
        match self.cache.get_value(CURRENT_USER_KEY).await? {
            Some(json) => {
                let account = serde_json::from_str(&json).context("Stored session is malformed")?;
                Ok(Some(account))
            }
            None => Ok(None),
        }
    }

    pub async fn set_current_user(&self, account: &Account) -> Result<()> {
        let json = serde_json::to_string(account)?;
        self.cache.put_value(CURRENT_USER_KEY, &json).await?;
        debug!("Session set for {}", account.username);
        Ok(())
    }

    /// Returns true if a session was present
    pub async fn clear_current_user(&self) -> Result<bool> {
        self.cache.delete_value(CURRENT_USER_KEY).await
    }
}
