//! Server configuration

use std::path::PathBuf;

use crate::auth::SessionConfig;

/// Server configuration — every setting can be overridden by environment
/// variables.
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | WORK_DIR | ./data | Working directory (database, logs) |
/// | HTTP_PORT | 3000 | HTTP API port |
/// | ENVIRONMENT | development | development \| staging \| production |
/// | SESSION_SECRET | (random) | Session token signing secret |
/// | SESSION_EXPIRATION_MINUTES | 1440 | Session lifetime |
/// | LOG_LEVEL | info | Tracing level filter |
/// | LOG_DIR | (stdout only) | Daily rolling log file directory |
///
/// # Example
///
/// ```ignore
/// WORK_DIR=/srv/payroll HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Working directory holding the database and log files
    pub work_dir: String,
    /// HTTP API port
    pub http_port: u16,
    /// Runtime environment: development | staging | production
    pub environment: String,
    /// Session token configuration
    pub session: SessionConfig,
}

impl Config {
    /// Load configuration from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "./data".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            session: SessionConfig::default(),
        }
    }

    /// Database file path inside the working directory
    pub fn database_path(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("payroll.db")
    }

    /// Log directory inside the working directory
    pub fn log_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("logs")
    }

    /// Ensure the working directory structure exists
    pub fn ensure_work_dir_structure(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.work_dir)?;
        std::fs::create_dir_all(self.log_dir())?;
        Ok(())
    }
}
