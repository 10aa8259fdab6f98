//! Balance Engine
//!
//! Pure fold of time records into signed minute totals. Addition is
//! commutative, so the result is independent of record order, and the input
//! is never mutated.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::db::models::{RecordKind, TimeRecord};

/// Accumulated totals for one group of records
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceTotals {
    /// Sum of CREDIT durations, in minutes
    pub credit_minutes: i64,
    /// Sum of DEBIT durations, in minutes
    pub debit_minutes: i64,
    /// Count of NEUTRAL (informational) records
    pub neutral_count: usize,
}

impl BalanceTotals {
    /// Net balance in minutes (credit − debit)
    pub fn net_minutes(&self) -> i64 {
        self.credit_minutes - self.debit_minutes
    }

    /// Fold one record into the totals
    ///
    /// NEUTRAL records contribute nothing to either total regardless of
    /// their duration.
    pub fn accumulate(&mut self, record: &TimeRecord) {
        match record.kind {
            RecordKind::Credit => self.credit_minutes += record.duration_minutes(),
            RecordKind::Debit => self.debit_minutes += record.duration_minutes(),
            RecordKind::Neutral => self.neutral_count += 1,
        }
    }
}

/// Fold a record list into one set of totals
pub fn summarize<'a, I>(records: I) -> BalanceTotals
where
    I: IntoIterator<Item = &'a TimeRecord>,
{
    let mut totals = BalanceTotals::default();
    for record in records {
        totals.accumulate(record);
    }
    totals
}

/// Fold a record list into per-group totals
///
/// The key function decides the grouping (employee, team, company);
/// returning `None` excludes the record, which is how callers drop records
/// whose employee is unknown or inactive.
pub fn summarize_by<'a, I, K, F>(records: I, mut key: F) -> BTreeMap<K, BalanceTotals>
where
    I: IntoIterator<Item = &'a TimeRecord>,
    K: Ord,
    F: FnMut(&TimeRecord) -> Option<K>,
{
    let mut groups: BTreeMap<K, BalanceTotals> = BTreeMap::new();
    for record in records {
        if let Some(k) = key(record) {
            groups.entry(k).or_default().accumulate(record);
        }
    }
    groups
}

/// Render a net balance as `±H:MM`
///
/// The sign is empty for non-negative balances; minutes are zero-padded.
pub fn format_balance(net_minutes: i64) -> String {
    let sign = if net_minutes >= 0 { "" } else { "-" };
    let magnitude = net_minutes.abs();
    format!("{}{}:{:02}", sign, magnitude / 60, magnitude % 60)
}

/// Render a non-negative minute total as `Hh Mm`
pub fn format_components(minutes: i64) -> String {
    format!("{}h {}m", minutes / 60, minutes % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::RecordOrigin;

    fn record(employee: &str, kind: RecordKind, hours: u32, minutes: u32) -> TimeRecord {
        TimeRecord {
            id: None,
            employee_id: format!("employee:{}", employee).parse().unwrap(),
            employee_name: employee.to_uppercase(),
            date: "2026-03-02".to_string(),
            hours,
            minutes,
            kind,
            occurrence_type: "BH Positivo".to_string(),
            reason: "teste".to_string(),
            created_at: "2026-03-02T08:00:00Z".to_string(),
            created_by: "employee:rh".parse().unwrap(),
            origin: RecordOrigin::Individual {
                start_time: None,
                end_time: None,
            },
        }
    }

    #[test]
    fn net_is_credit_minus_debit() {
        let records = vec![
            record("a", RecordKind::Credit, 2, 0),
            record("a", RecordKind::Debit, 1, 30),
        ];
        let totals = summarize(&records);
        assert_eq!(totals.credit_minutes, 120);
        assert_eq!(totals.debit_minutes, 90);
        assert_eq!(totals.net_minutes(), 30);
        assert_eq!(format_balance(totals.net_minutes()), "0:30");
    }

    #[test]
    fn neutral_records_only_count() {
        let records = vec![record("b", RecordKind::Neutral, 1, 0)];
        let totals = summarize(&records);
        assert_eq!(totals.credit_minutes, 0);
        assert_eq!(totals.debit_minutes, 0);
        assert_eq!(totals.neutral_count, 1);
        assert_eq!(format_balance(totals.net_minutes()), "0:00");
    }

    #[test]
    fn order_independent() {
        let mut records = vec![
            record("a", RecordKind::Credit, 3, 15),
            record("a", RecordKind::Debit, 0, 45),
            record("a", RecordKind::Credit, 0, 30),
            record("a", RecordKind::Neutral, 8, 0),
        ];
        let forward = summarize(&records);
        records.reverse();
        let backward = summarize(&records);
        assert_eq!(forward, backward);
    }

    #[test]
    fn groups_by_key_and_skips_none() {
        let records = vec![
            record("a", RecordKind::Credit, 1, 0),
            record("b", RecordKind::Debit, 0, 30),
            record("ghost", RecordKind::Credit, 9, 0),
        ];
        let groups = summarize_by(&records, |r| {
            let name = r.employee_name.clone();
            (name != "GHOST").then_some(name)
        });
        assert_eq!(groups.len(), 2);
        assert_eq!(groups["A"].net_minutes(), 60);
        assert_eq!(groups["B"].net_minutes(), -30);
    }

    #[test]
    fn negative_balance_formatting() {
        assert_eq!(format_balance(-90), "-1:30");
        assert_eq!(format_balance(0), "0:00");
        assert_eq!(format_balance(605), "10:05");
        assert_eq!(format_components(150), "2h 30m");
    }
}
