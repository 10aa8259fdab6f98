//! Time Record Repository
//!
//! Single-record operations. Records belonging to a bulk group must go
//! through [`super::BatchRepository`]; mutating one sibling alone is refused.

use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::TimeRecord;

#[derive(Clone)]
pub struct TimeRecordRepository {
    base: BaseRepository,
}

impl TimeRecordRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// All records, newest occurrence date first
    pub async fn find_all(&self) -> RepoResult<Vec<TimeRecord>> {
        let records: Vec<TimeRecord> = self
            .base
            .db()
            .query("SELECT * FROM time_record ORDER BY date DESC, created_at DESC")
            .await?
            .take(0)?;
        Ok(records)
    }

    /// Records owned by one employee
    ///
    /// Reference fields are stored in the canonical "table:id" string form,
    /// so lookups bind the normalized string.
    pub async fn find_by_employee(&self, employee_id: &str) -> RepoResult<Vec<TimeRecord>> {
        let thing: RecordId = employee_id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", employee_id)))?;
        let records: Vec<TimeRecord> = self
            .base
            .db()
            .query(
                "SELECT * FROM time_record WHERE employee_id = $employee \
                 ORDER BY date DESC, created_at DESC",
            )
            .bind(("employee", thing.to_string()))
            .await?
            .take(0)?;
        Ok(records)
    }

    /// Records authored by one user (leader-scoped visibility)
    pub async fn find_by_creator(&self, creator_id: &str) -> RepoResult<Vec<TimeRecord>> {
        let thing: RecordId = creator_id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", creator_id)))?;
        let records: Vec<TimeRecord> = self
            .base
            .db()
            .query(
                "SELECT * FROM time_record WHERE created_by = $creator \
                 ORDER BY date DESC, created_at DESC",
            )
            .bind(("creator", thing.to_string()))
            .await?
            .take(0)?;
        Ok(records)
    }

    /// Find record by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<TimeRecord>> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        let record: Option<TimeRecord> = self.base.db().select(thing).await?;
        Ok(record)
    }

    /// Persist a new record
    pub async fn create(&self, record: TimeRecord) -> RepoResult<TimeRecord> {
        let created: Option<TimeRecord> = self
            .base
            .db()
            .create("time_record")
            .content(record)
            .await?;
        created.ok_or_else(|| RepoError::Database("Failed to create time record".to_string()))
    }

    /// Replace a record's content
    ///
    /// The caller merges the partial update into the fetched record first;
    /// bulk-group members are rejected here.
    pub async fn replace(&self, id: &str, record: TimeRecord) -> RepoResult<TimeRecord> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Time record {} not found", id)))?;
        Self::ensure_not_batch_member(&existing)?;

        // The id travels in the key, not the content
        let mut record = record;
        record.id = None;
        let updated: Option<TimeRecord> =
            self.base.db().update(thing).content(record).await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Time record {} not found", id)))
    }

    /// Delete a single record
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Time record {} not found", id)))?;
        Self::ensure_not_batch_member(&existing)?;

        self.base
            .db()
            .query("DELETE $thing")
            .bind(("thing", thing))
            .await?;
        Ok(true)
    }

    fn ensure_not_batch_member(record: &TimeRecord) -> RepoResult<()> {
        if let Some(batch_id) = record.batch_id() {
            return Err(RepoError::Validation(format!(
                "Record belongs to batch {}; use the batch operations",
                batch_id
            )));
        }
        Ok(())
    }
}
