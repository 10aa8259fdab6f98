//! Time Record API Handlers
//!
//! Read scope follows the caller's role: admins see everything, leaders see
//! the records they authored, employees see their own. Mutations additionally
//! require authorship unless the caller is an admin.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;
use surrealdb::RecordId;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{
    RecordKind, RecordOrigin, Role, TimeRecord, TimeRecordCreate, TimeRecordUpdate,
};
use crate::db::repository::{EmployeeRepository, TimeRecordRepository};
use crate::occurrence::{self, EntryFlow, duration};
use crate::utils::time::{now_rfc3339, parse_date};
use crate::utils::{AppError, AppResult};

/// One selectable occurrence label with its signed effect
#[derive(Debug, Serialize)]
pub struct OccurrenceOption {
    pub label: &'static str,
    pub kind: RecordKind,
}

/// List records visible to the caller
pub async fn list(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<Vec<TimeRecord>>> {
    let repo = TimeRecordRepository::new(state.db.clone());
    let records = match user.role {
        Role::Admin => repo.find_all().await?,
        Role::Leader => repo.find_by_creator(&user.id).await?,
        Role::Employee => repo.find_by_employee(&user.id).await?,
    };
    Ok(Json(records))
}

/// Valid occurrence labels for one entry flow
pub async fn options(Path(flow): Path<String>) -> AppResult<Json<Vec<OccurrenceOption>>> {
    let flow: EntryFlow = flow
        .parse()
        .map_err(|e: String| AppError::validation(e))?;
    let options = occurrence::options(flow)
        .iter()
        .map(|(label, kind)| OccurrenceOption { label, kind: *kind })
        .collect();
    Ok(Json(options))
}

/// Get one record, scope-checked
pub async fn get_by_id(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<TimeRecord>> {
    let repo = TimeRecordRepository::new(state.db.clone());
    let record = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Time record {} not found", id)))?;
    ensure_visible(&user, &record)?;
    Ok(Json(record))
}

/// Create a single time record
///
/// The occurrence label is resolved against the flow's classification table;
/// an unknown label never reaches the store. Regularization labels produce a
/// zero-duration adjustment regardless of any supplied range or quantity;
/// everything else carries either a derived or an explicit duration, and a
/// zero duration is only accepted for NEUTRAL occurrence types.
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<TimeRecordCreate>,
) -> AppResult<Json<TimeRecord>> {
    if payload.flow == EntryFlow::Bulk {
        return Err(AppError::business_rule(
            "Bulk entries go through the batch endpoint",
        ));
    }

    let kind = occurrence::classify(payload.flow, &payload.occurrence_type)
        .map_err(|e| AppError::validation(e.to_string()))?;

    parse_date(&payload.date)
        .map_err(|_| AppError::validation(format!("Invalid date '{}'", payload.date)))?;
    if payload.reason.trim().is_empty() {
        return Err(AppError::validation("Reason is required"));
    }

    let emp_repo = EmployeeRepository::new(state.db.clone());
    let employee = emp_repo
        .find_by_id(&payload.employee_id)
        .await?
        .ok_or_else(|| {
            AppError::not_found(format!("Employee {} not found", payload.employee_id))
        })?;
    if !employee.active {
        return Err(AppError::business_rule(
            "Cannot create records for an inactive employee",
        ));
    }

    let (hours, minutes, origin) = if occurrence::is_regularization(&payload.occurrence_type) {
        // Range-based entry forms submit these labels with a time range;
        // whatever duration came along is discarded, and the punch being
        // corrected is the explicit punch_time or the start of the range
        let punch_time = payload
            .punch_time
            .clone()
            .or_else(|| payload.start_time.clone());
        (0, 0, RecordOrigin::Adjustment { punch_time })
    } else if payload.start_time.is_some() || payload.end_time.is_some() {
        let (h, m) = duration::calculate(
            payload.start_time.as_deref(),
            payload.end_time.as_deref(),
        )
        .map_err(|e| AppError::validation(e.to_string()))?;
        (
            h,
            m,
            RecordOrigin::Individual {
                start_time: payload.start_time.clone(),
                end_time: payload.end_time.clone(),
            },
        )
    } else {
        if payload.minutes > 59 {
            return Err(AppError::validation("Minutes must be between 0 and 59"));
        }
        (
            payload.hours,
            payload.minutes,
            RecordOrigin::Individual {
                start_time: None,
                end_time: None,
            },
        )
    };

    if hours == 0 && minutes == 0 && kind != RecordKind::Neutral {
        return Err(AppError::validation(
            "A zero duration is only valid for informational occurrence types",
        ));
    }

    let employee_id: RecordId = payload
        .employee_id
        .parse()
        .map_err(|_| AppError::validation(format!("Invalid ID: {}", payload.employee_id)))?;
    let created_by: RecordId = user
        .id
        .parse()
        .map_err(|_| AppError::internal("Malformed user id in token"))?;

    let record = TimeRecord {
        id: None,
        employee_id,
        employee_name: employee.name.clone(),
        date: payload.date,
        hours,
        minutes,
        kind,
        occurrence_type: payload.occurrence_type,
        reason: payload.reason,
        created_at: now_rfc3339(),
        created_by,
        origin,
    };

    let repo = TimeRecordRepository::new(state.db.clone());
    let created = repo.create(record).await?;
    tracing::info!(
        employee = %employee.email,
        occurrence = %created.occurrence_type,
        created_by = %user.username,
        "Time record created"
    );
    Ok(Json(created))
}

/// Update a single record
///
/// Members of a bulk group are refused at the repository; here we refuse
/// edits the caller does not own and keep the adjustment invariant (zero
/// duration) intact.
pub async fn update(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<TimeRecordUpdate>,
) -> AppResult<Json<TimeRecord>> {
    let repo = TimeRecordRepository::new(state.db.clone());
    let existing = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Time record {} not found", id)))?;
    ensure_mutable(&user, &existing)?;

    let mut record = existing;
    if let Some(date) = payload.date {
        parse_date(&date).map_err(|_| AppError::validation(format!("Invalid date '{}'", date)))?;
        record.date = date;
    }
    if let Some(reason) = payload.reason {
        if reason.trim().is_empty() {
            return Err(AppError::validation("Reason is required"));
        }
        record.reason = reason;
    }

    let touches_duration = payload.start_time.is_some()
        || payload.end_time.is_some()
        || payload.hours.is_some()
        || payload.minutes.is_some();

    match &mut record.origin {
        RecordOrigin::Individual {
            start_time,
            end_time,
        } => {
            if payload.start_time.is_some() || payload.end_time.is_some() {
                if payload.start_time.is_some() {
                    *start_time = payload.start_time;
                }
                if payload.end_time.is_some() {
                    *end_time = payload.end_time;
                }
                let (h, m) = duration::calculate(start_time.as_deref(), end_time.as_deref())
                    .map_err(|e| AppError::validation(e.to_string()))?;
                record.hours = h;
                record.minutes = m;
            } else {
                if let Some(h) = payload.hours {
                    record.hours = h;
                }
                if let Some(m) = payload.minutes {
                    if m > 59 {
                        return Err(AppError::validation("Minutes must be between 0 and 59"));
                    }
                    record.minutes = m;
                }
            }
            if record.hours == 0 && record.minutes == 0 && record.kind != RecordKind::Neutral {
                return Err(AppError::validation(
                    "A zero duration is only valid for informational occurrence types",
                ));
            }
        }
        RecordOrigin::Adjustment { .. } => {
            if touches_duration {
                return Err(AppError::validation(
                    "Regularization records carry no duration",
                ));
            }
        }
        // Repository refuses bulk members regardless
        RecordOrigin::Bulk { .. } => {}
    }

    let updated = repo.replace(&id, record).await?;
    Ok(Json(updated))
}

/// Delete a single record
pub async fn delete(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let repo = TimeRecordRepository::new(state.db.clone());
    let existing = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Time record {} not found", id)))?;
    ensure_mutable(&user, &existing)?;

    let result = repo.delete(&id).await?;
    tracing::info!(record = %id, deleted_by = %user.username, "Time record deleted");
    Ok(Json(result))
}

fn ensure_visible(user: &CurrentUser, record: &TimeRecord) -> AppResult<()> {
    let allowed = match user.role {
        Role::Admin => true,
        Role::Leader => record.created_by.to_string() == user.id,
        Role::Employee => record.employee_id.to_string() == user.id,
    };
    if allowed {
        Ok(())
    } else {
        Err(AppError::forbidden("You cannot view this record"))
    }
}

fn ensure_mutable(user: &CurrentUser, record: &TimeRecord) -> AppResult<()> {
    if user.is_admin() || record.created_by.to_string() == user.id {
        Ok(())
    } else {
        Err(AppError::forbidden("You can only modify records you created"))
    }
}
