//! Domain-level command and result types
//! These structs are used by services inside the domain layer and are **not**
//! exposed to the UI. The command layer in `io` maps the public DTOs defined
//! in the `shared` crate to these internal types.

pub mod accounts {
    use shared::Role;

    /// Input for creating a new account.
    #[derive(Debug, Clone)]
    pub struct CreateAccountCommand {
        pub username: String,
        pub password: String,
        pub role: Role,
    }

    /// Result of deleting an account.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct DeleteAccountResult {
        /// False when no account had the requested ID
        pub deleted: bool,
        pub remaining: usize,
    }

    /// Result of merging an imported batch into the store.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct ImportSummary {
        pub added: usize,
        pub skipped: usize,
    }
}

pub mod transfer {
    /// Serialized account list ready for a save dialog or download.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct ExportDocument {
        pub content: String,
        /// Suggested file name, `accounts_YYYY-MM-DD.json`
        pub filename: String,
        pub account_count: usize,
    }
}
