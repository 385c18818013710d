//! Utility module - shared helpers and types
//!
//! - [`AppError`] / [`AppResult`] - application error type
//! - [`AppResponse`] - API response envelope
//! - logging and validation helpers

pub mod error;
pub mod logger;
pub mod validation;

pub use error::{AppError, AppResponse, AppResult};
pub use error::{ok, ok_with_message};
