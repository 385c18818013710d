//! Payroll API Module

mod handler;

use axum::{Router, routing::get, routing::post};

use crate::core::ServerState;

/// Payroll router (session required on every route)
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/payrolls", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list))
        .route("/generate", post(handler::generate))
}
