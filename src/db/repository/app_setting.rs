//! App Setting Repository

use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{AppSetting, SettingKind};

#[derive(Clone)]
pub struct AppSettingRepository {
    base: BaseRepository,
}

impl AppSettingRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// All entries of one picklist, ordered by name
    pub async fn find_all(&self, kind: SettingKind) -> RepoResult<Vec<AppSetting>> {
        let items: Vec<AppSetting> = self
            .base
            .db()
            .query(format!("SELECT * FROM {} ORDER BY name", kind.table()))
            .await?
            .take(0)?;
        Ok(items)
    }

    /// Add a picklist entry
    pub async fn create(&self, kind: SettingKind, name: &str) -> RepoResult<AppSetting> {
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(RepoError::Validation("Name must not be empty".to_string()));
        }

        let mut result = self
            .base
            .db()
            .query(format!(
                "CREATE {} SET name = $name RETURN AFTER",
                kind.table()
            ))
            .bind(("name", name))
            .await?;

        let created: Option<AppSetting> = result.take(0)?;
        created.ok_or_else(|| RepoError::Database("Failed to create setting".to_string()))
    }

    /// Rename a picklist entry
    pub async fn rename(&self, kind: SettingKind, id: &str, name: &str) -> RepoResult<AppSetting> {
        let thing = Self::parse_id(kind, id)?;
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(RepoError::Validation("Name must not be empty".to_string()));
        }

        let mut result = self
            .base
            .db()
            .query("UPDATE $thing SET name = $name RETURN AFTER")
            .bind(("thing", thing))
            .bind(("name", name))
            .await?;

        result
            .take::<Option<AppSetting>>(0)?
            .ok_or_else(|| RepoError::NotFound(format!("Setting {} not found", id)))
    }

    /// Delete a picklist entry
    pub async fn delete(&self, kind: SettingKind, id: &str) -> RepoResult<bool> {
        let thing = Self::parse_id(kind, id)?;
        self.base
            .db()
            .query("DELETE $thing")
            .bind(("thing", thing))
            .await?;
        Ok(true)
    }

    fn parse_id(kind: SettingKind, id: &str) -> RepoResult<RecordId> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        if thing.table() != kind.table() {
            return Err(RepoError::Validation(format!(
                "ID {} does not belong to {}",
                id,
                kind.table()
            )));
        }
        Ok(thing)
    }
}
