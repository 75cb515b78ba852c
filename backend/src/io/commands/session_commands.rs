use log::info;
use shared::{CheckAuthResponse, CurrentUserResponse, LoginRequest, LoginResponse, LogoutResponse};

use super::user_message;
use crate::domain::AccountValidationError;
use crate::AppState;

/// Page shown after a successful login
pub const HOME_PAGE: &str = "index.html";

/// Page every unauthenticated visitor is sent to
pub const LOGIN_PAGE: &str = "login.html";

pub async fn login(app_state: &AppState, request: LoginRequest) -> Result<LoginResponse, String> {
    let username = request.username.trim();
    info!("🔑 Login requested for {}", username);

    if username.is_empty() || request.password.is_empty() {
        return Err(AccountValidationError::EmptyCredentials.to_string());
    }

    let user = app_state
        .session_service
        .login(username, &request.password)
        .await
        .map_err(user_message)?;

    Ok(LoginResponse {
        user,
        success_message: "Login successful!".to_string(),
        redirect_to: HOME_PAGE.to_string(),
    })
}

pub async fn logout(app_state: &AppState) -> Result<LogoutResponse, String> {
    info!("🚪 Logging out");
    app_state.session_service.logout().await.map_err(user_message)?;
    Ok(LogoutResponse {
        redirect_to: LOGIN_PAGE.to_string(),
    })
}

pub async fn get_current_user(app_state: &AppState) -> Result<CurrentUserResponse, String> {
    let current_user = app_state
        .session_service
        .current_user()
        .await
        .map_err(user_message)?;
    Ok(CurrentUserResponse { current_user })
}

/// Guard run before a protected page renders
pub async fn check_auth(app_state: &AppState) -> Result<CheckAuthResponse, String> {
    let current_user = app_state
        .session_service
        .current_user()
        .await
        .map_err(user_message)?;

    Ok(match current_user {
        Some(_) => CheckAuthResponse {
            authenticated: true,
            redirect_to: None,
        },
        None => {
            info!("No session, redirecting to {}", LOGIN_PAGE);
            CheckAuthResponse {
                authenticated: false,
                redirect_to: Some(LOGIN_PAGE.to_string()),
            }
        }
    })
}
