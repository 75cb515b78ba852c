use log::info;
use shared::{
    AccountListResponse, AccountResponse, CreateAccountRequest, DeleteAccountRequest,
    DeleteAccountResponse,
};

use super::user_message;
use crate::domain::AccountValidationError;
use crate::io::mappers::AccountMapper;
use crate::AppState;

pub async fn list_accounts(app_state: &AppState) -> Result<AccountListResponse, String> {
    info!("📋 Listing accounts");
    let accounts = app_state
        .account_service
        .list_accounts()
        .await
        .map_err(user_message)?;
    Ok(AccountMapper::to_account_list_dto(&accounts))
}

pub async fn create_account(
    app_state: &AppState,
    request: CreateAccountRequest,
) -> Result<AccountResponse, String> {
    info!("👤 Creating account: {}", request.username.trim());

    if request.username.trim().is_empty() || request.password.is_empty() {
        return Err(AccountValidationError::EmptyCredentials.to_string());
    }
    if let Some(confirm) = &request.confirm_password {
        if *confirm != request.password {
            return Err(AccountValidationError::PasswordMismatch.to_string());
        }
    }

    let command = AccountMapper::to_create_command(request);
    let account = app_state
        .account_service
        .create_account(command)
        .await
        .map_err(user_message)?;

    Ok(AccountMapper::to_account_response_dto(
        account,
        "Account created successfully!",
    ))
}

pub async fn delete_account(
    app_state: &AppState,
    request: DeleteAccountRequest,
) -> Result<DeleteAccountResponse, String> {
    info!("🗑️ Deleting account: {}", request.account_id);
    let result = app_state
        .account_service
        .delete_account(&request.account_id)
        .await
        .map_err(user_message)?;

    let success_message = if result.deleted {
        "Account deleted successfully!"
    } else {
        "Account was already removed"
    };

    Ok(DeleteAccountResponse {
        deleted: result.deleted,
        success_message: success_message.to_string(),
    })
}
