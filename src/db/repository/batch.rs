//! Batch Repository
//!
//! Bulk create/update/delete of time records sharing one `batch_id`.
//!
//! The store only commits a bounded number of operations at once, so a batch
//! is split into chunks of [`MAX_BATCH_OPS`] committed sequentially. A chunk
//! failure stops the operation without rollback; the [`BatchOutcome`] then
//! reports fewer `affected` than `targeted` rows and reconciliation is left
//! to the operator.

use serde::{Deserialize, Serialize};
use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{RecordKind, TimeRecord};

/// Maximum operations per committed chunk
pub const MAX_BATCH_OPS: usize = 500;

/// Result of a bulk operation, counted per record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchOutcome {
    /// Shared batch id of the affected group
    pub batch_id: String,
    /// Records the operation intended to touch
    pub targeted: usize,
    /// Records actually committed
    pub affected: usize,
}

impl BatchOutcome {
    /// True when every targeted record was committed
    pub fn is_complete(&self) -> bool {
        self.targeted == self.affected
    }
}

/// Shared fields a batch update may change
///
/// Per-record fields (`employee_id`, `employee_name`) are never touched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchUpdate {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub occurrence_type: Option<String>,
    #[serde(default)]
    pub hours: Option<u32>,
    #[serde(default)]
    pub minutes: Option<u32>,
    #[serde(default)]
    pub reason: Option<String>,
}

#[derive(Clone)]
pub struct BatchRepository {
    base: BaseRepository,
}

impl BatchRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// All records of one batch
    pub async fn find_by_batch(&self, batch_id: &str) -> RepoResult<Vec<TimeRecord>> {
        let records: Vec<TimeRecord> = self
            .base
            .db()
            .query("SELECT * FROM time_record WHERE batch_id = $batch_id ORDER BY employee_name")
            .bind(("batch_id", batch_id.to_string()))
            .await?
            .take(0)?;
        Ok(records)
    }

    /// Persist a freshly built batch of records in chunks
    ///
    /// Every record must already carry the same `Bulk` origin; the caller
    /// builds one record per employee from a single shared field set.
    pub async fn bulk_create(
        &self,
        batch_id: &str,
        records: Vec<TimeRecord>,
    ) -> RepoResult<BatchOutcome> {
        let targeted = records.len();
        let mut affected = 0usize;

        for chunk in records.chunks(MAX_BATCH_OPS) {
            let result = self
                .base
                .db()
                .query("INSERT INTO time_record $records")
                .bind(("records", chunk.to_vec()))
                .await;

            match result {
                Ok(mut response) => match response.take::<Vec<TimeRecord>>(0) {
                    Ok(created) => affected += created.len(),
                    Err(e) => {
                        tracing::error!(batch_id, error = %e, "Batch create chunk failed to parse");
                        break;
                    }
                },
                Err(e) => {
                    tracing::error!(batch_id, error = %e, "Batch create chunk failed");
                    break;
                }
            }
        }

        Ok(BatchOutcome {
            batch_id: batch_id.to_string(),
            targeted,
            affected,
        })
    }

    /// Apply the same partial field set to every record of a batch
    ///
    /// `kind` accompanies an `occurrence_type` change, resolved upstream
    /// against the classification table.
    pub async fn bulk_update(
        &self,
        batch_id: &str,
        update: BatchUpdate,
        kind: Option<RecordKind>,
    ) -> RepoResult<BatchOutcome> {
        let ids = self.member_ids(batch_id).await?;
        if ids.is_empty() {
            return Err(RepoError::NotFound(format!("Batch {} not found", batch_id)));
        }

        let targeted = ids.len();
        let mut affected = 0usize;

        for chunk in ids.chunks(MAX_BATCH_OPS) {
            let result = self
                .base
                .db()
                .query(
                    r#"UPDATE time_record SET
                        date = $date OR date,
                        occurrence_type = $occurrence_type OR occurrence_type,
                        kind = IF $has_kind THEN $kind ELSE kind END,
                        hours = IF $has_hours THEN $hours ELSE hours END,
                        minutes = IF $has_minutes THEN $minutes ELSE minutes END,
                        reason = $reason OR reason
                    WHERE id INSIDE $ids
                    RETURN AFTER"#,
                )
                .bind(("date", update.date.clone()))
                .bind(("occurrence_type", update.occurrence_type.clone()))
                .bind(("has_kind", kind.is_some()))
                .bind(("kind", kind))
                .bind(("has_hours", update.hours.is_some()))
                .bind(("hours", update.hours))
                .bind(("has_minutes", update.minutes.is_some()))
                .bind(("minutes", update.minutes))
                .bind(("reason", update.reason.clone()))
                .bind(("ids", chunk.to_vec()))
                .await;

            match result {
                Ok(mut response) => match response.take::<Vec<TimeRecord>>(0) {
                    Ok(updated) => affected += updated.len(),
                    Err(e) => {
                        tracing::error!(batch_id, error = %e, "Batch update chunk failed to parse");
                        break;
                    }
                },
                Err(e) => {
                    tracing::error!(batch_id, error = %e, "Batch update chunk failed");
                    break;
                }
            }
        }

        Ok(BatchOutcome {
            batch_id: batch_id.to_string(),
            targeted,
            affected,
        })
    }

    /// Delete every record of a batch
    pub async fn bulk_delete(&self, batch_id: &str) -> RepoResult<BatchOutcome> {
        let ids = self.member_ids(batch_id).await?;
        if ids.is_empty() {
            return Err(RepoError::NotFound(format!("Batch {} not found", batch_id)));
        }

        let targeted = ids.len();
        let mut affected = 0usize;

        for chunk in ids.chunks(MAX_BATCH_OPS) {
            let result = self
                .base
                .db()
                .query("DELETE time_record WHERE id INSIDE $ids RETURN BEFORE")
                .bind(("ids", chunk.to_vec()))
                .await;

            match result {
                Ok(mut response) => match response.take::<Vec<TimeRecord>>(0) {
                    Ok(deleted) => affected += deleted.len(),
                    Err(e) => {
                        tracing::error!(batch_id, error = %e, "Batch delete chunk failed to parse");
                        break;
                    }
                },
                Err(e) => {
                    tracing::error!(batch_id, error = %e, "Batch delete chunk failed");
                    break;
                }
            }
        }

        Ok(BatchOutcome {
            batch_id: batch_id.to_string(),
            targeted,
            affected,
        })
    }

    async fn member_ids(&self, batch_id: &str) -> RepoResult<Vec<RecordId>> {
        let ids: Vec<RecordId> = self
            .base
            .db()
            .query("SELECT VALUE id FROM time_record WHERE batch_id = $batch_id")
            .bind(("batch_id", batch_id.to_string()))
            .await?
            .take(0)?;
        Ok(ids)
    }
}
