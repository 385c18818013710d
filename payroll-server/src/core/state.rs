//! Server state

use std::sync::Arc;

use sqlx::SqlitePool;

use crate::auth::SessionService;
use crate::core::Config;
use crate::db::DbService;
use crate::utils::AppError;

/// Server state — shared handles for every request handler
///
/// Cloning is cheap: the pool and session service are shared references.
///
/// | Field | Type | Purpose |
/// |-------|------|---------|
/// | config | Config | Immutable configuration |
/// | db | SqlitePool | SQLite connection pool |
/// | sessions | Arc<SessionService> | Session token service |
#[derive(Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Config,
    /// SQLite connection pool
    pub db: SqlitePool,
    /// Session token service
    sessions: Arc<SessionService>,
}

impl ServerState {
    pub fn new(config: Config, db: SqlitePool, sessions: Arc<SessionService>) -> Self {
        Self {
            config,
            db,
            sessions,
        }
    }

    /// Initialize server state: working directory, database, session service
    pub async fn initialize(config: &Config) -> Result<Self, AppError> {
        config
            .ensure_work_dir_structure()
            .map_err(|e| AppError::internal(format!("Failed to create work directory: {e}")))?;

        let db_path = config.database_path();
        let db_service = DbService::new(&db_path.to_string_lossy()).await?;

        let sessions = Arc::new(SessionService::new(config.session.clone()));

        Ok(Self::new(config.clone(), db_service.pool, sessions))
    }

    /// In-memory state for tests: no files touched, random session secret
    pub async fn initialize_in_memory(config: &Config) -> Result<Self, AppError> {
        let db_service = DbService::new_in_memory().await?;
        let sessions = Arc::new(SessionService::new(config.session.clone()));
        Ok(Self::new(config.clone(), db_service.pool, sessions))
    }

    pub fn sessions(&self) -> &SessionService {
        &self.sessions
    }
}
