//! Settings API Handlers
//!
//! Company and team picklists. The kind travels in the path
//! (`companies` or `teams`).

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::db::models::{AppSetting, AppSettingWrite, SettingKind};
use crate::db::repository::AppSettingRepository;
use crate::utils::{AppError, AppResult};

fn parse_kind(kind: &str) -> AppResult<SettingKind> {
    kind.parse()
        .map_err(|e: String| AppError::validation(e))
}

/// List one picklist
pub async fn list(
    State(state): State<ServerState>,
    Path(kind): Path<String>,
) -> AppResult<Json<Vec<AppSetting>>> {
    let kind = parse_kind(&kind)?;
    let repo = AppSettingRepository::new(state.db.clone());
    let items = repo.find_all(kind).await?;
    Ok(Json(items))
}

/// Add a picklist entry
pub async fn create(
    State(state): State<ServerState>,
    Path(kind): Path<String>,
    Json(payload): Json<AppSettingWrite>,
) -> AppResult<Json<AppSetting>> {
    let kind = parse_kind(&kind)?;
    let repo = AppSettingRepository::new(state.db.clone());
    let item = repo.create(kind, &payload.name).await?;
    Ok(Json(item))
}

/// Rename a picklist entry
pub async fn rename(
    State(state): State<ServerState>,
    Path((kind, id)): Path<(String, String)>,
    Json(payload): Json<AppSettingWrite>,
) -> AppResult<Json<AppSetting>> {
    let kind = parse_kind(&kind)?;
    let repo = AppSettingRepository::new(state.db.clone());
    let item = repo.rename(kind, &id, &payload.name).await?;
    Ok(Json(item))
}

/// Delete a picklist entry
pub async fn delete(
    State(state): State<ServerState>,
    Path((kind, id)): Path<(String, String)>,
) -> AppResult<Json<bool>> {
    let kind = parse_kind(&kind)?;
    let repo = AppSettingRepository::new(state.db.clone());
    let result = repo.delete(kind, &id).await?;
    Ok(Json(result))
}
