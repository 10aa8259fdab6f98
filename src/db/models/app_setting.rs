//! App Setting Model
//!
//! Editable picklists (companies, teams/areas) used by the entry forms.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use super::serde_helpers;

/// Which picklist a setting item belongs to
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SettingKind {
    Company,
    Team,
}

impl SettingKind {
    /// Store table backing this picklist
    pub fn table(self) -> &'static str {
        match self {
            SettingKind::Company => "setting_company",
            SettingKind::Team => "setting_team",
        }
    }
}

impl FromStr for SettingKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "companies" => Ok(SettingKind::Company),
            "teams" => Ok(SettingKind::Team),
            other => Err(format!("unknown setting kind: {}", other)),
        }
    }
}

/// Picklist entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSetting {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    pub name: String,
}

/// Create/rename payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettingWrite {
    pub name: String,
}
