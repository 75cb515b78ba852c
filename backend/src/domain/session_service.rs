use log::{info, warn};
use shared::Account;

use crate::domain::account_service::AccountService;
use crate::domain::models::account::{AccountError, AuthError};
use crate::storage::SessionRepository;

/// Holds the account logged in to the running UI.
///
/// The session is either logged out or logged in as one account. A login
/// while already logged in replaces the session.
#[derive(Clone)]
pub struct SessionService {
    account_service: AccountService,
    sessions: SessionRepository,
}

impl SessionService {
    pub fn new(account_service: AccountService, sessions: SessionRepository) -> Self {
        Self {
            account_service,
            sessions,
        }
    }

    /// Log in with a plaintext username/password match
    pub async fn login(&self, username: &str, password: &str) -> Result<Account, AccountError> {
        info!("Login attempt for {}", username);

        let account = self
            .account_service
            .find_by_username(username)
            .await?
            .filter(|account| account.password == password);

        match account {
            Some(account) => {
                self.sessions
                    .set_current_user(&account)
                    .await
                    .map_err(AccountError::Storage)?;
                info!("Logged in as {} ({})", account.username, account.role);
                Ok(account)
            }
            None => {
                warn!("Login failed for {}", username);
                Err(AuthError::InvalidCredentials.into())
            }
        }
    }

    pub async fn current_user(&self) -> Result<Option<Account>, AccountError> {
        self.sessions.get_current_user().await.map_err(AccountError::Storage)
    }

    /// The logged-in account, or `AuthError::NotLoggedIn`
    pub async fn require_user(&self) -> Result<Account, AccountError> {
        self.current_user()
            .await?
            .ok_or_else(|| AuthError::NotLoggedIn.into())
    }

    pub async fn logout(&self) -> Result<(), AccountError> {
        let was_logged_in = self
            .sessions
            .clear_current_user()
            .await
            .map_err(AccountError::Storage)?;
        if was_logged_in {
            info!("Logged out");
        }
        Ok(())
    }
}
