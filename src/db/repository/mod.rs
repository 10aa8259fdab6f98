//! Repository Module
//!
//! CRUD operations against the embedded SurrealDB store.

pub mod app_setting;
pub mod batch;
pub mod employee;
pub mod time_record;

pub use app_setting::AppSettingRepository;
pub use batch::{BatchOutcome, BatchRepository, BatchUpdate, MAX_BATCH_OPS};
pub use employee::EmployeeRepository;
pub use time_record::TimeRecordRepository;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;
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

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

// ID convention: the full stack uses the "table:id" string format.
// Parse with `let id: RecordId = "employee:abc".parse()?` and pass the
// RecordId straight to select/update/delete.

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }
}
