use shared::Account;

/// Shortest password `create` accepts, counted in characters
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Input errors on account creation
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AccountValidationError {
    #[error("Please enter username and password")]
    EmptyCredentials,
    #[error("Password must be at least {min} characters")]
    PasswordTooShort { min: usize },
    #[error("Username '{0}' already exists")]
    DuplicateUsername(String),
    #[error("Passwords do not match")]
    PasswordMismatch,
}

/// Credential and session errors
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AuthError {
    /// Deliberately does not say which field was wrong
    #[error("Invalid username or password")]
    InvalidCredentials,
    #[error("Not logged in")]
    NotLoggedIn,
}

/// Every failure an account operation can report
#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    #[error(transparent)]
    Validation(#[from] AccountValidationError),
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error("Import file format error: {0}")]
    Format(String),
    #[error("File operation failed: {0:#}")]
    Io(anyhow::Error),
    #[error("Storage error: {0:#}")]
    Storage(anyhow::Error),
}

impl AccountError {
    pub fn is_format(&self) -> bool {
        matches!(self, AccountError::Format(_))
    }
}

/// Pick the ID for an account created at `now_millis`.
///
/// IDs are millisecond timestamps; when two accounts land in the same
/// millisecond the later one moves forward until its ID is free.
pub fn next_account_id(now_millis: u64, existing: &[Account]) -> String {
    let mut candidate = now_millis;
    loop {
        let id = Account::generate_id(candidate);
        if !existing.iter().any(|account| account.id == id) {
            return id;
        }
        candidate += 1;
    }
}
