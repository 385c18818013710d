//! Authentication Handlers
//!
//! Handles registration, login, logout, and the current-user endpoint

use std::time::Duration;

use axum::{
    Json,
    extract::State,
    http::header,
    response::{AppendHeaders, IntoResponse},
};
use serde::Serialize;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{Credentials, User};
use crate::db::repository::UserRepository;
use crate::security_log;
use crate::utils::validation::{
    MAX_PASSWORD_LEN, MAX_USERNAME_LEN, MIN_PASSWORD_LEN, validate_required_text,
};
use crate::utils::{AppError, AppResult, ok, ok_with_message};

/// Fixed delay for authentication to prevent timing attacks
const AUTH_FIXED_DELAY_MS: u64 = 500;

/// Public view of a user account
#[derive(Debug, Serialize)]
pub struct UserInfo {
    pub id: i64,
    pub username: String,
}

impl From<User> for UserInfo {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
        }
    }
}

fn validate_credentials(req: &Credentials) -> AppResult<()> {
    validate_required_text(&req.username, "username", MAX_USERNAME_LEN)?;
    if req.password.len() < MIN_PASSWORD_LEN {
        return Err(AppError::validation(format!(
            "password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    if req.password.len() > MAX_PASSWORD_LEN {
        return Err(AppError::validation(format!(
            "password must be at most {MAX_PASSWORD_LEN} characters"
        )));
    }
    Ok(())
}

/// Register handler
///
/// Creates a new login account. Usernames are unique; the raw password is
/// hashed with argon2 and never stored.
pub async fn register(
    State(state): State<ServerState>,
    Json(req): Json<Credentials>,
) -> AppResult<impl IntoResponse> {
    validate_credentials(&req)?;

    let repo = UserRepository::new(state.db.clone());
    let user = repo.create(req.username.trim(), &req.password).await?;

    tracing::info!(user_id = user.id, username = %user.username, "User registered");
    Ok(ok_with_message(
        UserInfo::from(user),
        "Registration successful",
    ))
}

/// Login handler
///
/// Verifies credentials and establishes a session cookie. Unknown username
/// and wrong password produce the same error, and a fixed delay runs before
/// either answer, so responses leak nothing about which accounts exist.
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<Credentials>,
) -> AppResult<impl IntoResponse> {
    let repo = UserRepository::new(state.db.clone());
    let user = repo.find_by_username(req.username.trim()).await?;

    // Fixed delay to prevent timing attacks (before checking result)
    tokio::time::sleep(Duration::from_millis(AUTH_FIXED_DELAY_MS)).await;

    let user = match user {
        Some(user) => {
            let password_valid = user
                .verify_password(&req.password)
                .map_err(|e| AppError::internal(format!("Password verification failed: {e}")))?;

            if !password_valid {
                security_log!(
                    "WARN",
                    "login_failed",
                    username = req.username.clone(),
                    reason = "invalid_credentials"
                );
                return Err(AppError::invalid_credentials());
            }
            user
        }
        None => {
            security_log!(
                "WARN",
                "login_failed",
                username = req.username.clone(),
                reason = "user_not_found"
            );
            return Err(AppError::invalid_credentials());
        }
    };

    let token = state
        .sessions()
        .issue(user.id, &user.username)
        .map_err(|e| AppError::internal(format!("Failed to issue session: {e}")))?;

    tracing::info!(user_id = user.id, username = %user.username, "User logged in");

    Ok((
        AppendHeaders([(header::SET_COOKIE, state.sessions().login_cookie(&token))]),
        ok_with_message(UserInfo::from(user), "Login successful"),
    ))
}

/// Logout handler — clears the session cookie
pub async fn logout(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<impl IntoResponse> {
    tracing::info!(user_id = user.id, username = %user.username, "User logged out");
    Ok((
        AppendHeaders([(header::SET_COOKIE, state.sessions().logout_cookie())]),
        ok_with_message((), "Logged out"),
    ))
}

/// Current user handler
pub async fn me(user: CurrentUser) -> AppResult<impl IntoResponse> {
    Ok(ok(user))
}
