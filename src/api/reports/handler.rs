//! Report API Handlers
//!
//! Balance aggregates over the caller's visible records. Records whose
//! employee is missing or inactive are excluded, so disabling an account
//! removes it from every aggregate without touching its history.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use axum::{
    Json,
    extract::{Query, State},
};
use serde::{Deserialize, Serialize};

use crate::auth::CurrentUser;
use crate::balance::{self, BalanceTotals};
use crate::core::ServerState;
use crate::db::models::{Employee, Role};
use crate::db::repository::{EmployeeRepository, TimeRecordRepository};
use crate::utils::AppResult;

#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum GroupBy {
    #[default]
    Employee,
    Team,
    Company,
    Global,
}

#[derive(Debug, Deserialize)]
pub struct ReportQuery {
    #[serde(default)]
    pub group_by: GroupBy,
}

/// One aggregate row
#[derive(Debug, Serialize)]
pub struct BalanceRow {
    /// Group label: employee name, team, company, or "Geral"
    pub group: String,
    pub credit_minutes: i64,
    pub debit_minutes: i64,
    pub net_minutes: i64,
    pub neutral_count: usize,
    /// Distinct active employees contributing to the group
    pub headcount: usize,
    /// Net balance rendered as ±H:MM
    pub balance: String,
    /// Credit and debit totals rendered as "Xh Ym"
    pub credit: String,
    pub debit: String,
}

/// Balance report grouped by employee, team, company, or globally
pub async fn balance(
    State(state): State<ServerState>,
    user: CurrentUser,
    Query(query): Query<ReportQuery>,
) -> AppResult<Json<Vec<BalanceRow>>> {
    let record_repo = TimeRecordRepository::new(state.db.clone());
    let records = match user.role {
        Role::Admin => record_repo.find_all().await?,
        Role::Leader => record_repo.find_by_creator(&user.id).await?,
        Role::Employee => record_repo.find_by_employee(&user.id).await?,
    };

    // Active roster, keyed by record id string
    let emp_repo = EmployeeRepository::new(state.db.clone());
    let active: HashMap<String, Employee> = emp_repo
        .find_all()
        .await?
        .into_iter()
        .filter_map(|e| e.id.as_ref().map(|id| (id.to_string(), e.clone())))
        .collect();

    let group_of = |employee: &Employee| -> String {
        match query.group_by {
            GroupBy::Employee => employee.name.clone(),
            GroupBy::Team => employee.team.clone(),
            GroupBy::Company => employee.company.clone(),
            GroupBy::Global => "Geral".to_string(),
        }
    };

    let totals: BTreeMap<String, BalanceTotals> = balance::summarize_by(&records, |record| {
        active
            .get(&record.employee_id.to_string())
            .map(&group_of)
    });

    let mut contributors: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
    for record in &records {
        let key = record.employee_id.to_string();
        if let Some(employee) = active.get(&key) {
            contributors.entry(group_of(employee)).or_default().insert(key);
        }
    }

    let rows = totals
        .into_iter()
        .map(|(group, totals)| {
            let headcount = contributors.get(&group).map_or(0, BTreeSet::len);
            BalanceRow {
                headcount,
                credit_minutes: totals.credit_minutes,
                debit_minutes: totals.debit_minutes,
                net_minutes: totals.net_minutes(),
                neutral_count: totals.neutral_count,
                balance: balance::format_balance(totals.net_minutes()),
                credit: balance::format_components(totals.credit_minutes),
                debit: balance::format_components(totals.debit_minutes),
                group,
            }
        })
        .collect();

    Ok(Json(rows))
}
