//! Import/export of the account list.
//!
//! Exports are the full account list, plaintext passwords included, as a
//! pretty-printed JSON array. Imports accept any JSON array of objects that
//! carry a string `username`; the rest of each record is checked against the
//! `Account` shape here, at the boundary, before the store ever sees it.

use anyhow::Context;
use chrono::{NaiveDate, Utc};
use log::{error, info};
use serde_json::Value;
use shared::Account;
use std::path::Path;

use crate::domain::account_service::AccountService;
use crate::domain::commands::accounts::ImportSummary;
use crate::domain::commands::transfer::ExportDocument;
use crate::domain::models::account::AccountError;

/// Export service that turns the account list into a transportable document
/// and back
#[derive(Clone)]
pub struct ImportExportService {
    account_service: AccountService,
}

impl ImportExportService {
    pub fn new(account_service: AccountService) -> Self {
        Self { account_service }
    }

    /// Serialize every stored account into an export document
    pub async fn export_all(&self) -> Result<ExportDocument, AccountError> {
        let accounts = self.account_service.list_accounts().await?;
        let document = render_export(&accounts, Utc::now().date_naive())?;

        info!(
            "Exported {} accounts ({} bytes) as {}",
            document.account_count,
            document.content.len(),
            document.filename
        );
        Ok(document)
    }

    /// Export and write the document to the path a save dialog returned
    pub async fn export_to_path(&self, path: &Path) -> Result<ExportDocument, AccountError> {
        let document = self.export_all().await?;

        tokio::fs::write(path, &document.content)
            .await
            .with_context(|| format!("Failed to write export to {}", path.display()))
            .map_err(|e| {
                error!("Export to {} failed: {:#}", path.display(), e);
                AccountError::Io(e)
            })?;

        info!("Wrote {} accounts to {}", document.account_count, path.display());
        Ok(document)
    }

    /// Read the document an open-file dialog picked
    pub async fn read_import_file(&self, path: &Path) -> Result<String, AccountError> {
        tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read import file {}", path.display()))
            .map_err(|e| {
                error!("Import from {} failed: {:#}", path.display(), e);
                AccountError::Io(e)
            })
    }

    /// Parse import text into candidate accounts
    pub fn parse_import(&self, text: &str) -> Result<Vec<Account>, AccountError> {
        parse_import(text)
    }

    /// Parse import text and merge it into the store.
    /// A format error aborts before any account is added.
    pub async fn import_from_text(&self, text: &str) -> Result<ImportSummary, AccountError> {
        let candidates = self.parse_import(text)?;
        self.account_service.import_accounts(candidates).await
    }
}

/// Suggested export file name for `date`
pub fn export_filename(date: NaiveDate) -> String {
    format!("accounts_{}.json", date.format("%Y-%m-%d"))
}

/// Build the export document for `accounts` dated `date`
pub fn render_export(accounts: &[Account], date: NaiveDate) -> Result<ExportDocument, AccountError> {
    let content = serde_json::to_string_pretty(accounts)
        .context("Failed to serialize accounts")
        .map_err(AccountError::Storage)?;

    Ok(ExportDocument {
        content,
        filename: export_filename(date),
        account_count: accounts.len(),
    })
}

/// Record fields stored as text
const TEXT_FIELDS: [&str; 3] = ["id", "password", "createdAt"];

/// Parse an import document.
///
/// Missing `id`, `password` and `createdAt` become empty strings and a
/// missing or null `role` becomes `doctor`; unknown fields are kept. A
/// non-string value in a text field is taken as its text: numbers and
/// booleans in decimal/literal form, null as an empty string. A record that
/// is not an object with a string `username`, or whose role is neither
/// `admin` nor `doctor`, fails the whole document.
pub fn parse_import(text: &str) -> Result<Vec<Account>, AccountError> {
    let document: Value = serde_json::from_str(text)
        .map_err(|e| AccountError::Format(format!("not valid JSON ({})", e)))?;

    let records = match document {
        Value::Array(records) => records,
        _ => {
            return Err(AccountError::Format(
                "top-level value must be an array of accounts".to_string(),
            ))
        }
    };

    records
        .into_iter()
        .enumerate()
        .map(|(index, record)| parse_record(index, record))
        .collect()
}

fn parse_record(index: usize, record: Value) -> Result<Account, AccountError> {
    let mut fields = match record {
        Value::Object(fields) if matches!(fields.get("username"), Some(Value::String(_))) => fields,
        _ => {
            return Err(AccountError::Format(format!(
                "record {} is not an account object with a username",
                index
            )))
        }
    };

    for key in TEXT_FIELDS {
        if let Some(value) = fields.get_mut(key) {
            if !value.is_string() {
                *value = Value::String(text_form(value));
            }
        }
    }
    if matches!(fields.get("role"), Some(Value::Null)) {
        fields.remove("role");
    }

    serde_json::from_value(Value::Object(fields))
        .map_err(|e| AccountError::Format(format!("record {} is malformed ({})", index, e)))
}

fn text_form(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
