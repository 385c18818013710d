//! Repository Module
//!
//! Provides CRUD operations over the SQLite tables.
//!
//! Uniqueness (users.username, employees.email) is enforced by the UNIQUE
//! constraints at insert time and surfaced as [`RepoError::Duplicate`];
//! there is no check-then-insert window for concurrent writers to race.

pub mod employee;
pub mod payroll;
pub mod user;

pub use employee::EmployeeRepository;
pub use payroll::PayrollRepository;
pub use user::UserRepository;

use rust_decimal::Decimal;
use sqlx::SqlitePool;
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

impl From<RepoError> for crate::utils::AppError {
    fn from(err: RepoError) -> Self {
        use crate::utils::AppError;
        match err {
            RepoError::NotFound(msg) => AppError::NotFound(msg),
            RepoError::Duplicate(msg) => AppError::Conflict(msg),
            RepoError::Validation(msg) => AppError::Validation(msg),
            RepoError::Database(msg) => AppError::Database(msg),
        }
    }
}

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    pool: SqlitePool,
}

impl BaseRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

/// Map an insert error: UNIQUE constraint violations become [`RepoError::Duplicate`]
/// with the given message, everything else stays a database error.
pub(crate) fn map_unique_violation(err: sqlx::Error, duplicate_msg: impl Into<String>) -> RepoError {
    match err.as_database_error() {
        Some(db_err) if db_err.is_unique_violation() => RepoError::Duplicate(duplicate_msg.into()),
        _ => RepoError::Database(err.to_string()),
    }
}

/// Parse a stored TEXT decimal column. Rows are written with canonical
/// decimal strings, so a parse failure means corrupt data.
pub(crate) fn parse_stored_decimal(value: &str, column: &str) -> RepoResult<Decimal> {
    value
        .parse()
        .map_err(|_| RepoError::Database(format!("Corrupt decimal in column {column}: '{value}'")))
}
