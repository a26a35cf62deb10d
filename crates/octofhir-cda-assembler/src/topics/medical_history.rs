//! Medical history entries

use crate::records::{HistoryKind, MedicalHistoryItem};
use octofhir_cda_model::{ClinicalStatement, StatementBuilder, StatementKind};

/// Problems become observations, procedures become procedure statements,
/// other events become acts
pub fn build(records: &[MedicalHistoryItem]) -> Vec<ClinicalStatement> {
    records.iter().map(build_one).collect()
}

fn build_one(record: &MedicalHistoryItem) -> ClinicalStatement {
    let kind = match record.kind {
        HistoryKind::Problem => StatementKind::Observation,
        HistoryKind::Procedure => StatementKind::Procedure,
        HistoryKind::OtherEvent => StatementKind::Act,
    };
    let mut builder = StatementBuilder::new(kind).code(record.code.clone());
    if let Some(interval) = &record.interval {
        builder = builder.effective_time(interval.clone());
    }
    if let Some(comment) = &record.comment {
        builder = builder.text(comment.clone());
    }
    builder.build()
}
