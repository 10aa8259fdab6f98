//! Time Record Model
//!
//! One dated occurrence in an employee's hour bank. The signed effect on the
//! balance comes from [`RecordKind`]; how the record entered the system is a
//! tagged [`RecordOrigin`] variant instead of a bag of optional fields.

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use super::serde_helpers;

/// Time record ID type
pub type TimeRecordId = RecordId;

/// Signed effect of a record on the hour bank
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecordKind {
    /// Adds to the balance
    Credit,
    /// Subtracts from the balance
    Debit,
    /// Informational only, no balance effect
    Neutral,
}

/// How the record entered the system
///
/// Flattened into the record, so the store sees `origin` plus the variant's
/// own fields at the top level.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "origin", rename_all = "snake_case")]
pub enum RecordOrigin {
    /// Individual entry, optionally backed by a same-day `HH:MM` range
    Individual {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        start_time: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        end_time: Option<String>,
    },
    /// Zero-impact regularization of a missing attendance punch
    ///
    /// Invariant: duration is always (0,0); `punch_time` records the punch
    /// being corrected.
    Adjustment {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        punch_time: Option<String>,
    },
    /// Created by a bulk HR action; all siblings share one `batch_id` and
    /// are mutated or deleted together.
    Bulk { batch_id: String },
}

/// Time record entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeRecord {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub id: Option<TimeRecordId>,

    /// Owning employee
    #[serde(with = "serde_helpers::record_id")]
    pub employee_id: RecordId,

    /// Employee name snapshot at creation time
    pub employee_name: String,

    /// Occurrence date (YYYY-MM-DD)
    pub date: String,

    /// Duration components, non-negative
    pub hours: u32,
    pub minutes: u32,

    /// Signed effect on the balance
    pub kind: RecordKind,

    /// Occurrence label resolved against the classification table
    pub occurrence_type: String,

    /// Mandatory justification
    pub reason: String,

    /// Creation timestamp (RFC 3339)
    pub created_at: String,

    /// Authoring employee - drives leader-scoped visibility
    #[serde(with = "serde_helpers::record_id")]
    pub created_by: RecordId,

    #[serde(flatten)]
    pub origin: RecordOrigin,
}

impl TimeRecord {
    /// Duration in minutes
    pub fn duration_minutes(&self) -> i64 {
        i64::from(self.hours) * 60 + i64::from(self.minutes)
    }

    /// Batch id if this record belongs to a bulk group
    pub fn batch_id(&self) -> Option<&str> {
        match &self.origin {
            RecordOrigin::Bulk { batch_id } => Some(batch_id),
            _ => None,
        }
    }

    /// True for zero-impact regularization records
    pub fn is_adjustment(&self) -> bool {
        matches!(self.origin, RecordOrigin::Adjustment { .. })
    }
}

/// Create payload for individual entry flows
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeRecordCreate {
    /// Entry surface the label must be validated against
    pub flow: crate::occurrence::EntryFlow,
    pub employee_id: String,
    pub date: String,
    pub occurrence_type: String,
    pub reason: String,
    /// Optional HH:MM range; when present the duration is derived from it
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
    /// Explicit duration for quantity-based entries
    #[serde(default)]
    pub hours: u32,
    #[serde(default)]
    pub minutes: u32,
    /// Punch being corrected, for regularization labels
    #[serde(default)]
    pub punch_time: Option<String>,
}

/// Update payload for a single record (partial)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TimeRecordUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hours: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minutes: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origin_serializes_flat() {
        let origin = RecordOrigin::Bulk {
            batch_id: "9f1c".to_string(),
        };
        let v = serde_json::to_value(&origin).unwrap();
        assert_eq!(v["origin"], "bulk");
        assert_eq!(v["batch_id"], "9f1c");
    }

    #[test]
    fn duration_minutes_combines_components() {
        let record = TimeRecord {
            id: None,
            employee_id: "employee:a".parse().unwrap(),
            employee_name: "A".into(),
            date: "2026-01-10".into(),
            hours: 2,
            minutes: 30,
            kind: RecordKind::Credit,
            occurrence_type: "Hora Extra".into(),
            reason: "plantão".into(),
            created_at: "2026-01-10T12:00:00Z".into(),
            created_by: "employee:b".parse().unwrap(),
            origin: RecordOrigin::Individual {
                start_time: None,
                end_time: None,
            },
        };
        assert_eq!(record.duration_minutes(), 150);
        assert!(record.batch_id().is_none());
        assert!(!record.is_adjustment());
    }
}
