use chrono::{SecondsFormat, Utc};
use log::{info, warn};
use serde_json::Map;
use shared::Account;
use std::collections::HashSet;

use crate::domain::commands::accounts::{CreateAccountCommand, DeleteAccountResult, ImportSummary};
use crate::domain::models::account::{
    next_account_id, AccountError, AccountValidationError, MIN_PASSWORD_LENGTH,
};
use crate::storage::{AccountRepository, MirrorStatus};

/// Service for managing the stored account list
#[derive(Clone)]
pub struct AccountService {
    repository: AccountRepository,
}

impl AccountService {
    /// Create a new AccountService
    pub fn new(repository: AccountRepository) -> Self {
        Self { repository }
    }

    /// List all accounts in insertion order
    pub async fn list_accounts(&self) -> Result<Vec<Account>, AccountError> {
        self.repository.load_accounts().await.map_err(AccountError::Storage)
    }

    /// Find the account with exactly this username
    pub async fn find_by_username(&self, username: &str) -> Result<Option<Account>, AccountError> {
        let accounts = self.list_accounts().await?;
        Ok(accounts.into_iter().find(|account| account.username == username))
    }

    /// Create a new account
    pub async fn create_account(&self, command: CreateAccountCommand) -> Result<Account, AccountError> {
        info!("Creating account: username={}, role={}", command.username, command.role);

        self.validate_create_command(&command)?;

        let mut accounts = self.list_accounts().await?;
        if accounts.iter().any(|account| account.username == command.username) {
            warn!("Rejected duplicate username: {}", command.username);
            return Err(AccountValidationError::DuplicateUsername(command.username).into());
        }

        let now = Utc::now();
        let account = Account {
            id: next_account_id(now.timestamp_millis().max(0) as u64, &accounts),
            username: command.username,
            password: command.password,
            role: command.role,
            created_at: now.to_rfc3339_opts(SecondsFormat::Millis, true),
            extra: Map::new(),
        };

        accounts.push(account.clone());
        self.save(&accounts).await?;

        info!("Created account: {} with ID: {}", account.username, account.id);
        Ok(account)
    }

    /// Delete an account. An unknown ID is not an error.
    pub async fn delete_account(&self, account_id: &str) -> Result<DeleteAccountResult, AccountError> {
        info!("Deleting account: {}", account_id);

        let mut accounts = self.list_accounts().await?;
        let before = accounts.len();
        accounts.retain(|account| account.id != account_id);
        let deleted = accounts.len() != before;

        self.save(&accounts).await?;

        if deleted {
            info!("Deleted account: {}", account_id);
        } else {
            warn!("Account not found for deletion: {}", account_id);
        }

        Ok(DeleteAccountResult {
            deleted,
            remaining: accounts.len(),
        })
    }

    /// Append imported records whose usernames are not taken yet.
    ///
    /// Records are trusted as-is: no password length check and no ID
    /// uniqueness check. The list is saved once after the whole batch.
    pub async fn import_accounts(&self, incoming: Vec<Account>) -> Result<ImportSummary, AccountError> {
        info!("Importing {} accounts", incoming.len());

        let mut accounts = self.list_accounts().await?;
        let mut usernames: HashSet<String> =
            accounts.iter().map(|account| account.username.clone()).collect();
        let mut summary = ImportSummary::default();

        for account in incoming {
            if usernames.insert(account.username.clone()) {
                accounts.push(account);
                summary.added += 1;
            } else {
                summary.skipped += 1;
            }
        }

        self.save(&accounts).await?;

        info!("Import finished: {} added, {} skipped", summary.added, summary.skipped);
        Ok(summary)
    }

    async fn save(&self, accounts: &[Account]) -> Result<(), AccountError> {
        let status = self
            .repository
            .save_accounts(accounts)
            .await
            .map_err(AccountError::Storage)?;

        if status == MirrorStatus::Failed {
            warn!("Account list saved to cache only; mirror is out of date");
        }
        Ok(())
    }

    /// Validate create account command
    fn validate_create_command(&self, command: &CreateAccountCommand) -> Result<(), AccountValidationError> {
        if command.username.is_empty() || command.password.is_empty() {
            return Err(AccountValidationError::EmptyCredentials);
        }

        if command.password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(AccountValidationError::PasswordTooShort {
                min: MIN_PASSWORD_LENGTH,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::test_utils::{sample_account, TestEnvironment};
    use shared::Role;

    fn create_command(username: &str, password: &str, role: Role) -> CreateAccountCommand {
        CreateAccountCommand {
            username: username.to_string(),
            password: password.to_string(),
            role,
        }
    }

    async fn setup_test() -> (AccountService, TestEnvironment) {
        let env = TestEnvironment::new().await.expect("Failed to create test environment");
        let service = AccountService::new(env.account_repository());
        (service, env)
    }

    #[tokio::test]
    async fn test_list_empty_store() {
        let (service, _env) = setup_test().await;

        let accounts = service.list_accounts().await.expect("Failed to list accounts");
        assert!(accounts.is_empty());
    }

    #[tokio::test]
    async fn test_create_account() {
        let (service, _env) = setup_test().await;

        let account = service
            .create_account(create_command("admin1", "password1", Role::Admin))
            .await
            .expect("Failed to create account");

        assert_eq!(account.username, "admin1");
        assert_eq!(account.password, "password1");
        assert_eq!(account.role, Role::Admin);
        assert!(account.id.parse::<u64>().is_ok());
        assert!(account.created_at.ends_with('Z'));
        assert!(chrono::DateTime::parse_from_rfc3339(&account.created_at).is_ok());

        let accounts = service.list_accounts().await.unwrap();
        assert_eq!(accounts, vec![account]);
    }

    #[tokio::test]
    async fn test_create_preserves_call_order() {
        let (service, _env) = setup_test().await;

        let names = ["zoe", "adam", "mia", "bob"];
        let mut created = Vec::new();
        for name in names {
            created.push(
                service
                    .create_account(create_command(name, "secret1", Role::Doctor))
                    .await
                    .unwrap(),
            );
        }

        let accounts = service.list_accounts().await.unwrap();
        assert_eq!(accounts, created);

        // Created back to back, the IDs are still unique
        let ids: HashSet<&str> = accounts.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids.len(), names.len());
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_username() {
        let (service, _env) = setup_test().await;

        service
            .create_account(create_command("alice", "secret1", Role::Admin))
            .await
            .unwrap();
        let before = service.list_accounts().await.unwrap();

        let err = service
            .create_account(create_command("alice", "another1", Role::Doctor))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            AccountError::Validation(AccountValidationError::DuplicateUsername(ref name)) if name == "alice"
        ));
        assert_eq!(service.list_accounts().await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_username_match_is_case_sensitive() {
        let (service, _env) = setup_test().await;

        service
            .create_account(create_command("alice", "secret1", Role::Admin))
            .await
            .unwrap();
        service
            .create_account(create_command("Alice", "secret1", Role::Doctor))
            .await
            .expect("Usernames differing in case are distinct");

        assert_eq!(service.list_accounts().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_create_validation() {
        let (service, _env) = setup_test().await;

        let err = service
            .create_account(create_command("", "secret1", Role::Admin))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            AccountError::Validation(AccountValidationError::EmptyCredentials)
        ));

        let err = service
            .create_account(create_command("alice", "", Role::Admin))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            AccountError::Validation(AccountValidationError::EmptyCredentials)
        ));

        let err = service
            .create_account(create_command("alice", "12345", Role::Admin))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            AccountError::Validation(AccountValidationError::PasswordTooShort { min: 6 })
        ));

        // Six characters is enough, counted as characters not bytes
        service
            .create_account(create_command("alice", "密码密码密码", Role::Admin))
            .await
            .expect("Six-character password should be accepted");

        assert_eq!(service.list_accounts().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_create_stores_username_verbatim() {
        let (service, _env) = setup_test().await;

        let account = service
            .create_account(create_command(" alice ", "secret1", Role::Doctor))
            .await
            .unwrap();
        assert_eq!(account.username, " alice ");

        // Only an exact match is a duplicate
        service
            .create_account(create_command("alice", "secret1", Role::Doctor))
            .await
            .expect("Untrimmed username is a different account");
        assert_eq!(service.list_accounts().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_find_by_username() {
        let (service, _env) = setup_test().await;

        let alice = service
            .create_account(create_command("alice", "secret1", Role::Admin))
            .await
            .unwrap();

        assert_eq!(service.find_by_username("alice").await.unwrap(), Some(alice));
        assert_eq!(service.find_by_username("ALICE").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_delete_account_is_idempotent() {
        let (service, _env) = setup_test().await;

        let alice = service
            .create_account(create_command("alice", "secret1", Role::Admin))
            .await
            .unwrap();
        let bob = service
            .create_account(create_command("bob", "secret1", Role::Doctor))
            .await
            .unwrap();

        let result = service.delete_account(&alice.id).await.unwrap();
        assert_eq!(result, DeleteAccountResult { deleted: true, remaining: 1 });
        let after_first = service.list_accounts().await.unwrap();
        assert_eq!(after_first, vec![bob]);

        let result = service.delete_account(&alice.id).await.unwrap();
        assert_eq!(result, DeleteAccountResult { deleted: false, remaining: 1 });
        assert_eq!(service.list_accounts().await.unwrap(), after_first);
    }

    #[tokio::test]
    async fn test_import_skips_existing_usernames() {
        let (service, _env) = setup_test().await;

        let alice = service
            .create_account(create_command("alice", "secret1", Role::Admin))
            .await
            .unwrap();

        let incoming = vec![sample_account("99", "alice", "different", Role::Doctor)];
        let summary = service.import_accounts(incoming).await.unwrap();

        assert_eq!(summary, ImportSummary { added: 0, skipped: 1 });
        assert_eq!(service.list_accounts().await.unwrap(), vec![alice]);
    }

    #[tokio::test]
    async fn test_import_trusts_records_verbatim() {
        let (service, _env) = setup_test().await;

        let mut short_password = sample_account("1", "carol", "abc", Role::Doctor);
        short_password
            .extra
            .insert("department".to_string(), serde_json::json!("surgery"));
        let same_id = sample_account("1", "dave", "secret1", Role::Admin);

        let summary = service
            .import_accounts(vec![short_password.clone(), same_id.clone()])
            .await
            .unwrap();

        assert_eq!(summary, ImportSummary { added: 2, skipped: 0 });
        assert_eq!(
            service.list_accounts().await.unwrap(),
            vec![short_password, same_id]
        );
    }

    #[tokio::test]
    async fn test_import_dedupes_within_batch() {
        let (service, _env) = setup_test().await;

        let first = sample_account("1", "erin", "secret1", Role::Doctor);
        let second = sample_account("2", "erin", "secret2", Role::Admin);

        let summary = service
            .import_accounts(vec![first.clone(), second])
            .await
            .unwrap();

        assert_eq!(summary, ImportSummary { added: 1, skipped: 1 });
        assert_eq!(service.list_accounts().await.unwrap(), vec![first]);
    }

    #[tokio::test]
    async fn test_mutations_update_mirror() {
        let (service, env) = setup_test().await;

        let account = service
            .create_account(create_command("alice", "secret1", Role::Admin))
            .await
            .unwrap();

        let mirrored = crate::storage::AccountMirror::read_accounts(&env.mirror())
            .await
            .unwrap();
        assert_eq!(mirrored, Some(vec![account.clone()]));

        service.delete_account(&account.id).await.unwrap();
        let mirrored = crate::storage::AccountMirror::read_accounts(&env.mirror())
            .await
            .unwrap();
        assert_eq!(mirrored, Some(Vec::new()));
    }

    #[tokio::test]
    async fn test_mirror_failure_does_not_fail_create() {
        let env = TestEnvironment::new().await.unwrap();
        let service = AccountService::new(env.account_repository_with_broken_mirror());

        let account = service
            .create_account(create_command("alice", "secret1", Role::Admin))
            .await
            .expect("Mirror failure must not fail create");

        assert_eq!(service.list_accounts().await.unwrap(), vec![account]);
    }
}
