use chrono::DateTime;
use shared::{
    Account, AccountListResponse, AccountResponse, AccountSummary, CreateAccountRequest,
    ImportAccountsResponse,
};

use crate::domain::commands::accounts::{CreateAccountCommand, ImportSummary};

/// Mapper between shared account DTOs and domain commands/results.
pub struct AccountMapper;

impl AccountMapper {
    /// Builds the domain command from a form submission. The username is
    /// trimmed the way the form input is; the password is taken as typed.
    pub fn to_create_command(request: CreateAccountRequest) -> CreateAccountCommand {
        CreateAccountCommand {
            username: request.username.trim().to_string(),
            password: request.password,
            role: request.role,
        }
    }

    /// Converts an account into one row of the rendered account list.
    pub fn to_summary(account: &Account) -> AccountSummary {
        AccountSummary {
            id: account.id.clone(),
            username: account.username.clone(),
            role: account.role,
            role_label: account.role.label().to_string(),
            created_date: Self::created_date(&account.created_at),
        }
    }

    pub fn to_account_list_dto(accounts: &[Account]) -> AccountListResponse {
        AccountListResponse {
            accounts: accounts.iter().map(Self::to_summary).collect(),
        }
    }

    pub fn to_account_response_dto(account: Account, message: &str) -> AccountResponse {
        AccountResponse {
            account,
            success_message: message.to_string(),
        }
    }

    pub fn to_import_response_dto(summary: ImportSummary) -> ImportAccountsResponse {
        let mut message = format!("Import complete! Added {} account(s)", summary.added);
        if summary.skipped > 0 {
            message.push_str(&format!(", skipped {} duplicate account(s)", summary.skipped));
        }

        ImportAccountsResponse {
            added: summary.added,
            skipped: summary.skipped,
            success_message: message,
        }
    }

    /// Date part of an RFC 3339 timestamp; imported values that do not parse
    /// are shown as stored.
    fn created_date(created_at: &str) -> String {
        match DateTime::parse_from_rfc3339(created_at) {
            Ok(timestamp) => timestamp.date_naive().format("%Y-%m-%d").to_string(),
            Err(_) => created_at.to_string(),
        }
    }
}
