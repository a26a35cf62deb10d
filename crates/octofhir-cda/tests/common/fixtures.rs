//! Fixture builders for complete documents

use octofhir_cda::assembler::{
    AdverseReaction, DocumentMeta, ExclusionReason, Medication, TopicInput, TopicRecords,
};
use octofhir_cda::model::{Author, DocumentType};
use octofhir_cda::templates::DocumentSelector;
use octofhir_cda::types::{CodedConcept, InstanceIdentifier, PhysicalQuantity, Timestamp};
use rust_decimal::Decimal;

pub const SNOMED: &str = "2.16.840.1.113883.6.96";
pub const AMT: &str = "1.2.36.1.2001.1004.100";
pub const DOC_ROOT: &str = "1.2.36.1.2001.1005.41";

pub fn document_id(extension: &str) -> InstanceIdentifier {
    InstanceIdentifier::with_extension(DOC_ROOT, extension).unwrap()
}

pub fn author() -> Author {
    Author::new(document_id("author-1"))
        .named("Dr Alex Tran")
        .at(Timestamp::ymd_hm(2025, 11, 3, 9, 0).with_offset(600))
}

pub fn shs_meta() -> DocumentMeta {
    DocumentMeta::new(
        DocumentSelector::new(DocumentType::SharedHealthSummary),
        document_id("doc-1"),
        Timestamp::ymd_hm(2025, 11, 3, 9, 30).with_offset(600),
    )
    .with_author(author())
}

pub fn paracetamol() -> Medication {
    let mut record = Medication::new(CodedConcept::coded(
        "23641011000036102",
        AMT,
        "paracetamol 500 mg tablet",
    ));
    record.directions = Some("Two tablets every four to six hours".to_string());
    record.dose = Some(PhysicalQuantity::new(Decimal::from(1000), "mg"));
    record.status_text = Some("Current".to_string());
    record
}

pub fn amoxicillin_reaction() -> AdverseReaction {
    let mut record = AdverseReaction::new(CodedConcept::coded("372687004", SNOMED, "Amoxicillin"));
    record.manifestations = vec![CodedConcept::coded("271807003", SNOMED, "Skin rash")];
    record
}

/// Topic inputs for a complete shared health summary: two populated topics
/// and two satisfied by exclusion statements
pub fn shs_inputs() -> Vec<TopicInput> {
    vec![
        TopicInput::new(TopicRecords::AdverseReactions(vec![amoxicillin_reaction()])),
        TopicInput::new(TopicRecords::Medications(vec![paracetamol()])),
        TopicInput::new(TopicRecords::MedicalHistory(vec![]))
            .with_exclusion(ExclusionReason::NoneKnown),
        TopicInput::new(TopicRecords::Immunisations(vec![]))
            .with_exclusion(ExclusionReason::NotAsked),
    ]
}
