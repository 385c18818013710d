//! Payroll Server - internal employee and payroll tracking service
//!
//! # Overview
//!
//! A small JSON API for tracking employees and running simple payroll
//! calculations, gated by username/password login:
//!
//! - **Authentication** (`auth`): argon2 password hashing, cookie sessions
//! - **Database** (`db`): embedded SQLite via sqlx, repository per table
//! - **Payroll** (`payroll`): pure decimal pay calculation
//! - **HTTP API** (`api`): axum routers and handlers
//!
//! # Module structure
//!
//! ```text
//! payroll-server/src/
//! ├── core/          # configuration, state, server lifecycle
//! ├── auth/          # session tokens, gate middleware, extractor
//! ├── api/           # HTTP routes and handlers
//! ├── db/            # pool, models, repositories
//! ├── payroll/       # pay calculation
//! └── utils/         # errors, logging, validation
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod payroll;
pub mod utils;

// Re-export public types
pub use auth::{CurrentUser, SessionService};
pub use core::{Config, Server, ServerState};
pub use utils::{AppError, AppResponse, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

// Security logging macro - structured events for auth failures and friends
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

/// Load `.env` and initialize logging; call once at startup
pub fn setup_environment() {
    dotenv::dotenv().ok();
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into());
    init_logger_with_file(Some(&log_level), std::env::var("LOG_DIR").ok().as_deref());
}
