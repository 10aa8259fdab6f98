//! Batch API Handlers
//!
//! Bulk record operations for HR. Each bulk creation mints one batch id and
//! every generated record shares it; later mutations always address the whole
//! group. A partially committed batch still answers 200, with the message
//! reporting how many of the targeted records were actually touched.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;
use surrealdb::RecordId;
use uuid::Uuid;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{RecordKind, RecordOrigin, TimeRecord};
use crate::db::repository::{BatchOutcome, BatchRepository, BatchUpdate, EmployeeRepository};
use crate::occurrence::{self, EntryFlow};
use crate::utils::error::ok_with_message;
use crate::utils::time::{now_rfc3339, parse_date};
use crate::utils::{AppError, AppResponse, AppResult};

/// Bulk creation payload: one shared field set applied to many employees
#[derive(Debug, Deserialize)]
pub struct BatchCreateRequest {
    pub employee_ids: Vec<String>,
    pub date: String,
    pub occurrence_type: String,
    #[serde(default)]
    pub hours: u32,
    #[serde(default)]
    pub minutes: u32,
    pub reason: String,
}

/// Create one record per employee, all sharing a fresh batch id
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<BatchCreateRequest>,
) -> AppResult<Json<AppResponse<BatchOutcome>>> {
    if payload.employee_ids.is_empty() {
        return Err(AppError::validation("At least one employee is required"));
    }

    let kind = occurrence::classify(EntryFlow::Bulk, &payload.occurrence_type)
        .map_err(|e| AppError::validation(e.to_string()))?;

    parse_date(&payload.date)
        .map_err(|_| AppError::validation(format!("Invalid date '{}'", payload.date)))?;
    if payload.reason.trim().is_empty() {
        return Err(AppError::validation("Reason is required"));
    }
    if payload.minutes > 59 {
        return Err(AppError::validation("Minutes must be between 0 and 59"));
    }
    if payload.hours == 0 && payload.minutes == 0 && kind != RecordKind::Neutral {
        return Err(AppError::validation(
            "A zero duration is only valid for informational occurrence types",
        ));
    }

    let created_by: RecordId = user
        .id
        .parse()
        .map_err(|_| AppError::internal("Malformed user id in token"))?;

    // Resolve every target before writing anything; one unknown or inactive
    // employee fails the whole request
    let emp_repo = EmployeeRepository::new(state.db.clone());
    let mut targets = Vec::with_capacity(payload.employee_ids.len());
    for employee_id in &payload.employee_ids {
        let employee = emp_repo
            .find_by_id(employee_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Employee {} not found", employee_id)))?;
        if !employee.active {
            return Err(AppError::business_rule(format!(
                "Employee {} is inactive",
                employee.name
            )));
        }
        let thing: RecordId = employee_id
            .parse()
            .map_err(|_| AppError::validation(format!("Invalid ID: {}", employee_id)))?;
        targets.push((thing, employee.name));
    }

    let batch_id = Uuid::new_v4().to_string();
    let created_at = now_rfc3339();
    let records: Vec<TimeRecord> = targets
        .into_iter()
        .map(|(employee_id, employee_name)| TimeRecord {
            id: None,
            employee_id,
            employee_name,
            date: payload.date.clone(),
            hours: payload.hours,
            minutes: payload.minutes,
            kind,
            occurrence_type: payload.occurrence_type.clone(),
            reason: payload.reason.clone(),
            created_at: created_at.clone(),
            created_by: created_by.clone(),
            origin: RecordOrigin::Bulk {
                batch_id: batch_id.clone(),
            },
        })
        .collect();

    let repo = BatchRepository::new(state.db.clone());
    let outcome = repo.bulk_create(&batch_id, records).await?;

    if !outcome.is_complete() {
        tracing::warn!(
            batch_id = %outcome.batch_id,
            targeted = outcome.targeted,
            affected = outcome.affected,
            "Batch creation partially committed"
        );
    }
    let message = format!(
        "{} of {} records created",
        outcome.affected, outcome.targeted
    );
    Ok(ok_with_message(outcome, message))
}

/// List every record of one batch
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(batch_id): Path<String>,
) -> AppResult<Json<Vec<TimeRecord>>> {
    let repo = BatchRepository::new(state.db.clone());
    let records = repo.find_by_batch(&batch_id).await?;
    if records.is_empty() {
        return Err(AppError::not_found(format!("Batch {} not found", batch_id)));
    }
    Ok(Json(records))
}

/// Apply the same partial update to every record of a batch
pub async fn update(
    State(state): State<ServerState>,
    Path(batch_id): Path<String>,
    Json(payload): Json<BatchUpdate>,
) -> AppResult<Json<AppResponse<BatchOutcome>>> {
    // An occurrence change re-resolves the kind along with it
    let kind = match payload.occurrence_type.as_deref() {
        Some(label) => Some(
            occurrence::classify(EntryFlow::Bulk, label)
                .map_err(|e| AppError::validation(e.to_string()))?,
        ),
        None => None,
    };
    if let Some(date) = payload.date.as_deref() {
        parse_date(date).map_err(|_| AppError::validation(format!("Invalid date '{}'", date)))?;
    }
    if payload.minutes.is_some_and(|m| m > 59) {
        return Err(AppError::validation("Minutes must be between 0 and 59"));
    }

    let repo = BatchRepository::new(state.db.clone());

    // Siblings share one field set, so the first member stands in for the
    // group when checking what the update would leave behind
    let members = repo.find_by_batch(&batch_id).await?;
    let sample = members
        .first()
        .ok_or_else(|| AppError::not_found(format!("Batch {} not found", batch_id)))?;
    let hours = payload.hours.unwrap_or(sample.hours);
    let minutes = payload.minutes.unwrap_or(sample.minutes);
    let effective_kind = kind.unwrap_or(sample.kind);
    if hours == 0 && minutes == 0 && effective_kind != RecordKind::Neutral {
        return Err(AppError::validation(
            "A zero duration is only valid for informational occurrence types",
        ));
    }

    let outcome = repo.bulk_update(&batch_id, payload, kind).await?;

    let message = format!(
        "{} of {} records updated",
        outcome.affected, outcome.targeted
    );
    Ok(ok_with_message(outcome, message))
}

/// Delete every record of a batch
pub async fn delete(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(batch_id): Path<String>,
) -> AppResult<Json<AppResponse<BatchOutcome>>> {
    let repo = BatchRepository::new(state.db.clone());
    let outcome = repo.bulk_delete(&batch_id).await?;

    tracing::info!(
        batch_id = %outcome.batch_id,
        affected = outcome.affected,
        deleted_by = %user.username,
        "Batch deleted"
    );
    let message = format!(
        "{} of {} records deleted",
        outcome.affected, outcome.targeted
    );
    Ok(ok_with_message(outcome, message))
}
