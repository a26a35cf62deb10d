//! Event detail entries

use crate::records::EventDetail;
use octofhir_cda_model::{ClinicalStatement, StatementBuilder, StatementKind};
use octofhir_cda_types::CodedConcept;

fn default_code() -> CodedConcept {
    CodedConcept::coded("102.16672", "1.2.36.1.2001.1001.101", "Event Overview")
}

/// One act per event detail record
pub fn build(records: &[EventDetail]) -> Vec<ClinicalStatement> {
    records.iter().map(build_one).collect()
}

fn build_one(record: &EventDetail) -> ClinicalStatement {
    let mut builder = StatementBuilder::new(StatementKind::Act)
        .code(record.code.clone().unwrap_or_else(default_code))
        .text(record.description.clone());
    if let Some(period) = &record.period {
        builder = builder.effective_time(period.clone());
    }
    builder.build()
}
