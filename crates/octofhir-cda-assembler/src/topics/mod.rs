//! Per-topic entry builders
//!
//! Each module translates one record family into clinical statement trees.
//! A record with nothing to say produces no entry; builders never emit
//! nodes with nulled-out fields to stand in for missing data.

pub mod adverse_reactions;
pub mod encounters;
pub mod event_details;
pub mod imaging;
pub mod immunisations;
pub mod medical_history;
pub mod medications;
pub mod pathology;
pub mod related_documents;

use crate::records::TopicRecords;
use octofhir_cda_model::ClinicalStatement;

/// Build the entries for a record family
pub fn build_entries(records: &TopicRecords) -> Vec<ClinicalStatement> {
    match records {
        TopicRecords::Medications(r) => medications::build(r),
        TopicRecords::AdverseReactions(r) => adverse_reactions::build(r),
        TopicRecords::MedicalHistory(r) => medical_history::build(r),
        TopicRecords::Immunisations(r) => immunisations::build(r),
        TopicRecords::PathologyResults(r) => pathology::build(r),
        TopicRecords::ImagingResults(r) => imaging::build(r),
        TopicRecords::Encounters(r) => encounters::build(r),
        TopicRecords::RelatedDocuments(r) => related_documents::build(r),
        TopicRecords::EventDetails(r) => event_details::build(r),
    }
}
