//! Session gate middleware
//!
//! Axum middleware enforcing the single binary authorization rule:
//! protected operations require an authenticated session, everything else
//! is anonymous. There are no roles or per-operation permissions.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::auth::CurrentUser;
use crate::auth::session::{SessionError, token_from_cookie_header};
use crate::core::ServerState;
use crate::security_log;
use crate::utils::AppError;

/// Paths reachable without a session
fn is_public_api_route(path: &str) -> bool {
    matches!(
        path,
        "/api/auth/login" | "/api/auth/register" | "/api/health"
    )
}

/// Session gate — requires a valid session cookie
///
/// Reads the `session` cookie, validates the token, and injects
/// [`CurrentUser`] into request extensions on success.
///
/// # Skipped paths
///
/// - `OPTIONS *` (CORS preflight)
/// - non-`/api/` paths (they 404 normally)
/// - `/api/auth/login`, `/api/auth/register`, `/api/health`
///
/// # Errors
///
/// | Condition | Response |
/// |-----------|----------|
/// | No session cookie | 401 Unauthorized |
/// | Expired token | 401 SessionExpired |
/// | Invalid token | 401 InvalidSession |
pub async fn require_auth(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let path = req.uri().path();

    // Allow CORS preflight OPTIONS requests through
    if req.method() == http::Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    // Non-API routes skip the gate
    if !path.starts_with("/api/") {
        return Ok(next.run(req).await);
    }

    if is_public_api_route(path) {
        return Ok(next.run(req).await);
    }

    let token = req
        .headers()
        .get(http::header::COOKIE)
        .and_then(|h| h.to_str().ok())
        .and_then(token_from_cookie_header);

    let Some(token) = token else {
        security_log!("WARN", "auth_missing", uri = format!("{:?}", req.uri()));
        return Err(AppError::Unauthorized);
    };

    match state.sessions().validate(token) {
        Ok(claims) => {
            let user = CurrentUser::from(claims);
            req.extensions_mut().insert(user);
            Ok(next.run(req).await)
        }
        Err(e) => {
            security_log!(
                "WARN",
                "auth_failed",
                error = format!("{}", e),
                uri = format!("{:?}", req.uri())
            );

            match e {
                SessionError::Expired => Err(AppError::SessionExpired),
                _ => Err(AppError::InvalidSession),
            }
        }
    }
}
