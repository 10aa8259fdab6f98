//! Server state
//!
//! [`ServerState`] holds the shared service handles cloned into every axum
//! handler: configuration, the embedded database, and the JWT service.

use std::path::Path;
use std::sync::Arc;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::auth::JwtService;
use crate::core::Config;
use crate::db::DbService;
use crate::utils::AppError;

/// Shared application state (cheap to clone, Arc-backed)
#[derive(Clone)]
pub struct ServerState {
    pub config: Arc<Config>,
    pub db: Surreal<Db>,
    jwt_service: Arc<JwtService>,
}

impl ServerState {
    /// Construct state from already-built parts (tests use this directly)
    pub fn new(config: Config, db: Surreal<Db>, jwt_service: JwtService) -> Self {
        Self {
            config: Arc::new(config),
            db,
            jwt_service: Arc::new(jwt_service),
        }
    }

    /// Initialize all services for the given configuration
    ///
    /// Opens the database under `work_dir`, applies table definitions, and
    /// provisions the super admin profile when missing.
    pub async fn initialize(config: &Config) -> Result<Self, AppError> {
        let work_dir = Path::new(&config.work_dir);
        std::fs::create_dir_all(work_dir)
            .map_err(|e| AppError::internal(format!("Failed to create work dir: {}", e)))?;

        let db_service = DbService::new(&work_dir.join("db")).await?;
        db_service.bootstrap_super_admin(config).await?;

        let jwt_service = JwtService::with_config(config.jwt.clone());

        Ok(Self::new(config.clone(), db_service.db, jwt_service))
    }

    pub fn jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }
}
