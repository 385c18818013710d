//! Auth API Module

mod handler;

use axum::{Router, routing::get, routing::post};

use crate::core::ServerState;

/// Auth router
///
/// `/register` and `/login` are on the session gate's public list;
/// `/logout` and `/me` require an active session.
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/auth", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/register", post(handler::register))
        .route("/login", post(handler::login))
        .route("/logout", post(handler::logout))
        .route("/me", get(handler::me))
}
