//! Database Module
//!
//! Owns the embedded SurrealDB connection, table definitions, and the
//! startup bootstrap of the super admin profile.

pub mod models;
pub mod repository;

use std::path::Path;

use surrealdb::Surreal;
use surrealdb::engine::local::{Db, RocksDb};

use crate::core::Config;
use crate::db::models::AuthIdentity;
use crate::db::repository::EmployeeRepository;
use crate::utils::AppError;

/// Database service - owns the embedded SurrealDB handle
#[derive(Clone)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// Open (or create) the database under the given directory
    pub async fn new(db_path: &Path) -> Result<Self, AppError> {
        let db: Surreal<Db> = Surreal::new::<RocksDb>(db_path)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {}", e)))?;

        db.use_ns("hourbank")
            .use_db("main")
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {}", e)))?;

        let service = Self { db };
        service.define_schema().await?;
        tracing::info!("Database ready at {}", db_path.display());

        Ok(service)
    }

    /// Table and index definitions (idempotent)
    async fn define_schema(&self) -> Result<(), AppError> {
        self.db
            .query(
                r#"
                DEFINE TABLE IF NOT EXISTS employee SCHEMALESS;
                DEFINE INDEX IF NOT EXISTS employee_email ON employee FIELDS email UNIQUE;
                DEFINE TABLE IF NOT EXISTS time_record SCHEMALESS;
                DEFINE INDEX IF NOT EXISTS time_record_employee ON time_record FIELDS employee_id;
                DEFINE INDEX IF NOT EXISTS time_record_creator ON time_record FIELDS created_by;
                DEFINE INDEX IF NOT EXISTS time_record_batch ON time_record FIELDS batch_id;
                DEFINE TABLE IF NOT EXISTS setting_company SCHEMALESS;
                DEFINE TABLE IF NOT EXISTS setting_team SCHEMALESS;
                "#,
            )
            .await
            .map_err(|e| AppError::database(format!("Failed to define schema: {}", e)))?;
        Ok(())
    }

    /// Ensure the configured super admin profile exists
    ///
    /// Provisioning goes through the same profile rules as any identity:
    /// the super-admin email is promoted to ADMIN, everyone else would get
    /// a default EMPLOYEE profile.
    pub async fn bootstrap_super_admin(&self, config: &Config) -> Result<(), AppError> {
        let repo = EmployeeRepository::new(self.db.clone());

        let existing = repo.find_by_email(&config.super_admin_email).await?;
        if existing.is_some() {
            return Ok(());
        }

        if config.super_admin_password == crate::core::config::DEFAULT_SUPER_ADMIN_PASSWORD {
            tracing::warn!(
                "SUPER_ADMIN_PASSWORD not set; bootstrapping {} with the default password",
                config.super_admin_email
            );
        }

        let admin = repo
            .get_or_create_profile(
                AuthIdentity {
                    email: config.super_admin_email.clone(),
                    display_name: Some("Administrador".to_string()),
                    password: config.super_admin_password.clone(),
                },
                &config.super_admin_email,
                &config.default_company,
            )
            .await?;

        tracing::info!(
            email = %admin.email,
            "Super admin profile provisioned"
        );
        Ok(())
    }
}
