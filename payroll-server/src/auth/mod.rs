//! Authentication
//!
//! Argon2 password hashing lives on the [`User`](crate::db::models::User)
//! model; this module owns the session side: token service, the gate
//! middleware, and the handler-side extractor.

pub mod extractor;
pub mod middleware;
pub mod session;

pub use extractor::CurrentUser;
pub use middleware::require_auth;
pub use session::{SessionConfig, SessionService};
