use log::info;
use shared::{
    ExportAccountsResponse, ExportToPathRequest, ExportToPathResponse, ImportAccountsRequest,
    ImportAccountsResponse, ImportFromPathRequest,
};
use std::path::Path;

use super::user_message;
use crate::io::mappers::AccountMapper;
use crate::AppState;

const NOTHING_TO_EXPORT: &str = "No account data to export";

/// Build the export document for a browser download or a save dialog
pub async fn export_accounts(app_state: &AppState) -> Result<ExportAccountsResponse, String> {
    info!("📤 Exporting accounts");
    let document = app_state
        .import_export_service
        .export_all()
        .await
        .map_err(user_message)?;

    if document.account_count == 0 {
        return Err(NOTHING_TO_EXPORT.to_string());
    }

    Ok(ExportAccountsResponse {
        content: document.content,
        filename: document.filename,
        account_count: document.account_count,
    })
}

/// Write the export document to the path the save dialog returned
pub async fn export_accounts_to_path(
    app_state: &AppState,
    request: ExportToPathRequest,
) -> Result<ExportToPathResponse, String> {
    info!("📤 Exporting accounts to {}", request.path);

    let accounts = app_state
        .account_service
        .list_accounts()
        .await
        .map_err(user_message)?;
    if accounts.is_empty() {
        return Err(NOTHING_TO_EXPORT.to_string());
    }

    let document = app_state
        .import_export_service
        .export_to_path(Path::new(&request.path))
        .await
        .map_err(user_message)?;

    Ok(ExportToPathResponse {
        success_message: format!("Account data exported to: {}", request.path),
        path: request.path,
        account_count: document.account_count,
    })
}

/// Import from document text read by the UI
pub async fn import_accounts(
    app_state: &AppState,
    request: ImportAccountsRequest,
) -> Result<ImportAccountsResponse, String> {
    info!("📥 Importing accounts ({} bytes)", request.content.len());
    let summary = app_state
        .import_export_service
        .import_from_text(&request.content)
        .await
        .map_err(user_message)?;
    Ok(AccountMapper::to_import_response_dto(summary))
}

/// Import from the path the open-file dialog returned
pub async fn import_accounts_from_path(
    app_state: &AppState,
    request: ImportFromPathRequest,
) -> Result<ImportAccountsResponse, String> {
    info!("📥 Importing accounts from {}", request.path);
    let content = app_state
        .import_export_service
        .read_import_file(Path::new(&request.path))
        .await
        .map_err(user_message)?;

    import_accounts(app_state, ImportAccountsRequest { content }).await
}
