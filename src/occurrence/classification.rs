//! Occurrence Classification Table
//!
//! Static mapping from occurrence labels to their signed balance effect.
//! Each entry flow carries its own label set; a label outside the flow's set
//! is rejected rather than silently defaulted.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::db::models::RecordKind;

/// Which entry surface a record is coming from
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EntryFlow {
    /// Leader entering occurrences for a team member (time-range based)
    SelfService,
    /// HR manual entry (quantity based)
    Manual,
    /// HR bulk entry for many employees at once
    Bulk,
}

impl FromStr for EntryFlow {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "self_service" => Ok(EntryFlow::SelfService),
            "manual" => Ok(EntryFlow::Manual),
            "bulk" => Ok(EntryFlow::Bulk),
            other => Err(format!("unknown entry flow: {}", other)),
        }
    }
}

/// Unknown label for the given flow
#[derive(Debug, Error)]
#[error("Unknown occurrence type '{label}' for this entry flow")]
pub struct UnknownLabel {
    pub label: String,
}

const SELF_SERVICE_OPTIONS: &[(&str, RecordKind)] = &[
    ("BH Positivo", RecordKind::Credit),
    ("BH Negativo", RecordKind::Debit),
    ("Compensação de horas positivas", RecordKind::Debit),
    ("Falta do dia inteiro", RecordKind::Debit),
    ("Ausência de Batida", RecordKind::Neutral),
    ("Pagamento de horas", RecordKind::Debit),
    ("Exame periódico", RecordKind::Neutral),
    (
        "Atrasos e saídas antecipadas (desconto em folha)",
        RecordKind::Neutral,
    ),
    ("Liberação por atestado médico", RecordKind::Neutral),
];

const MANUAL_OPTIONS: &[(&str, RecordKind)] = &[
    ("Ajuste de Ponto (Esquecimento)", RecordKind::Credit),
    ("Trabalho Externo", RecordKind::Credit),
    ("Batida Esquecida (Regularização)", RecordKind::Neutral),
    ("Hora Extra", RecordKind::Credit),
    ("Falta Não Justificada", RecordKind::Debit),
    ("Suspensão", RecordKind::Debit),
    ("Saída Antecipada", RecordKind::Debit),
    ("Atestado Médico", RecordKind::Neutral),
    ("Falta Justificada", RecordKind::Neutral),
];

const BULK_OPTIONS: &[(&str, RecordKind)] = &[
    ("BH Positivo (Crédito)", RecordKind::Credit),
    ("BH Negativo (Débito)", RecordKind::Debit),
    ("Ajuste de Ponto (Manual)", RecordKind::Neutral),
];

/// Labels that exist only to regularize a missing attendance punch;
/// their records never carry a duration.
const REGULARIZATION_LABELS: &[&str] = &["Ausência de Batida", "Batida Esquecida (Regularização)"];

/// Valid labels for one flow, with their effect
pub fn options(flow: EntryFlow) -> &'static [(&'static str, RecordKind)] {
    match flow {
        EntryFlow::SelfService => SELF_SERVICE_OPTIONS,
        EntryFlow::Manual => MANUAL_OPTIONS,
        EntryFlow::Bulk => BULK_OPTIONS,
    }
}

/// Resolve a label to its signed effect within one flow
///
/// Unmapped labels are an error, never a silent default kind; a mistyped
/// label must not change anyone's balance.
pub fn classify(flow: EntryFlow, label: &str) -> Result<RecordKind, UnknownLabel> {
    options(flow)
        .iter()
        .find(|(candidate, _)| *candidate == label)
        .map(|(_, kind)| *kind)
        .ok_or_else(|| UnknownLabel {
            label: label.to_string(),
        })
}

/// True for labels that regularize a punch without touching the balance
pub fn is_regularization(label: &str) -> bool {
    REGULARIZATION_LABELS.contains(&label)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_labels_resolve() {
        assert_eq!(
            classify(EntryFlow::SelfService, "BH Positivo").unwrap(),
            RecordKind::Credit
        );
        assert_eq!(
            classify(EntryFlow::Manual, "Suspensão").unwrap(),
            RecordKind::Debit
        );
        assert_eq!(
            classify(EntryFlow::Bulk, "Ajuste de Ponto (Manual)").unwrap(),
            RecordKind::Neutral
        );
    }

    #[test]
    fn labels_are_flow_scoped() {
        // A manual label is not valid in the self-service flow
        assert!(classify(EntryFlow::SelfService, "Hora Extra").is_err());
        assert!(classify(EntryFlow::Bulk, "BH Positivo").is_err());
    }

    #[test]
    fn unmapped_labels_are_rejected_not_defaulted() {
        let err = classify(EntryFlow::SelfService, "Hora Extre").unwrap_err();
        assert!(err.to_string().contains("Hora Extre"));
    }

    #[test]
    fn regularization_labels() {
        assert!(is_regularization("Ausência de Batida"));
        assert!(is_regularization("Batida Esquecida (Regularização)"));
        assert!(!is_regularization("Hora Extra"));
    }
}
