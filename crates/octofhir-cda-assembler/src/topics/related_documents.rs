//! Related document entries
//!
//! Each reference becomes an act wrapping a multimedia observation that
//! carries the target's media reference.

use crate::records::RelatedDocument;
use octofhir_cda_model::{ClinicalStatement, EntryValue, StatementBuilder, StatementKind};
use octofhir_cda_types::CodedConcept;

fn default_code() -> CodedConcept {
    CodedConcept::coded("102.16971", "1.2.36.1.2001.1001.101", "Related Document")
}

/// One act per referenced document
pub fn build(records: &[RelatedDocument]) -> Vec<ClinicalStatement> {
    records.iter().map(build_one).collect()
}

fn build_one(record: &RelatedDocument) -> ClinicalStatement {
    let mut media = StatementBuilder::new(StatementKind::ObservationMedia)
        .value(EntryValue::Media(record.media.clone()));
    if let Some(title) = &record.title {
        media = media.text(title.clone());
    }
    StatementBuilder::new(StatementKind::Act)
        .code(record.document_code.clone().unwrap_or_else(default_code))
        .component(media.build())
        .build()
}
