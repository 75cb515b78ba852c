use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Stored user account.
///
/// This is the record written to the key-value cache, the file mirror and
/// export documents. Account IDs are the creation time in epoch
/// milliseconds rendered as a decimal string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    #[serde(default)]
    pub id: String,
    pub username: String,
    /// Plaintext password
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub role: Role,
    /// RFC 3339 timestamp with millisecond precision
    #[serde(rename = "createdAt", default)]
    pub created_at: String,
    /// Fields this version does not know about, written back verbatim
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Role an account is granted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    #[default]
    Doctor,
}

impl Role {
    /// Human-readable label shown in the account list and navigation bar
    pub fn label(&self) -> &'static str {
        match self {
            Role::Admin => "Administrator",
            Role::Doctor => "Doctor",
        }
    }

    /// Wire name of the role
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Doctor => "doctor",
        }
    }

    pub fn parse(value: &str) -> Option<Role> {
        match value {
            "admin" => Some(Role::Admin),
            "doctor" => Some(Role::Doctor),
            _ => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Account {
    /// Generate an account ID based on timestamp
    pub fn generate_id(epoch_millis: u64) -> String {
        epoch_millis.to_string()
    }
}

/// Request for creating a new account
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreateAccountRequest {
    pub username: String,
    pub password: String,
    /// Second entry of the password field, checked before the account is created
    pub confirm_password: Option<String>,
    pub role: Role,
}

/// Response after creating an account
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AccountResponse {
    pub account: Account,
    pub success_message: String,
}

/// One row of the rendered account list
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AccountSummary {
    pub id: String,
    pub username: String,
    pub role: Role,
    pub role_label: String,
    /// Creation date (YYYY-MM-DD), or the raw stored value if it is not a timestamp
    pub created_date: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AccountListResponse {
    pub accounts: Vec<AccountSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DeleteAccountRequest {
    pub account_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DeleteAccountResponse {
    /// False when no account had the requested ID
    pub deleted: bool,
    pub success_message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoginResponse {
    pub user: Account,
    pub success_message: String,
    /// Page the UI should navigate to after a successful login
    pub redirect_to: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LogoutResponse {
    pub redirect_to: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CurrentUserResponse {
    pub current_user: Option<Account>,
}

/// Result of the page guard run before a protected page renders
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CheckAuthResponse {
    pub authenticated: bool,
    /// Set when the UI must leave the page
    pub redirect_to: Option<String>,
}

/// Export document ready to hand to a save dialog or browser download
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExportAccountsResponse {
    pub content: String,
    pub filename: String,
    pub account_count: usize,
}

/// Request to write the export document to a path picked in a save dialog
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExportToPathRequest {
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExportToPathResponse {
    pub path: String,
    pub account_count: usize,
    pub success_message: String,
}

/// Import from document text (browser file reader)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ImportAccountsRequest {
    pub content: String,
}

/// Import from a path picked in an open-file dialog
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ImportFromPathRequest {
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ImportAccountsResponse {
    pub added: usize,
    pub skipped: usize,
    pub success_message: String,
}

/// Log line forwarded from the UI
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LogEntry {
    pub level: String,
    pub message: String,
    pub timestamp: Option<String>,
}
