//! Document-level vocabulary and the assembled envelope

use crate::{Author, Coverage, Section};
use octofhir_cda_types::{CodedConcept, InstanceIdentifier, TemplateId, Timestamp};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The logical document types the engine can assemble
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DocumentType {
    /// Curated summary of a patient's health status
    SharedHealthSummary,
    /// Summary of a single healthcare event
    EventSummary,
    /// Referral to another provider
    EReferral,
    /// Letter back from a specialist
    SpecialistLetter,
    /// Summary at discharge from an episode of care
    DischargeSummary,
    /// Advance care planning information
    AdvanceCareInformation,
    /// Pathology report with structured results
    PathologyReport,
    /// Diagnostic imaging report
    DiagnosticImagingReport,
    /// Health summary entered by the patient
    ConsumerEnteredHealthSummary,
}

impl DocumentType {
    /// Canonical camelCase name, used in validation issue details
    pub const fn name(&self) -> &'static str {
        match self {
            Self::SharedHealthSummary => "sharedHealthSummary",
            Self::EventSummary => "eventSummary",
            Self::EReferral => "eReferral",
            Self::SpecialistLetter => "specialistLetter",
            Self::DischargeSummary => "dischargeSummary",
            Self::AdvanceCareInformation => "advanceCareInformation",
            Self::PathologyReport => "pathologyReport",
            Self::DiagnosticImagingReport => "diagnosticImagingReport",
            Self::ConsumerEnteredHealthSummary => "consumerEnteredHealthSummary",
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Subtypes refining a document type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DocumentSubtype {
    /// Goals-of-care variant of advance care information
    GoalsOfCare,
    /// Planning variant of advance care information
    AdvanceCarePlanning,
}

impl DocumentSubtype {
    /// Canonical camelCase name
    pub const fn name(&self) -> &'static str {
        match self {
            Self::GoalsOfCare => "goalsOfCare",
            Self::AdvanceCarePlanning => "advanceCarePlanning",
        }
    }
}

impl fmt::Display for DocumentSubtype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Conformance profile variants for the same logical document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ConformanceProfile {
    /// Narrative-only rendition
    NarrativeOnly,
    /// Fully structured rendition
    #[default]
    Structured,
}

/// Document lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DocumentStatus {
    /// Not yet complete
    Interim,
    /// Complete
    Final,
    /// Complete and subsequently amended
    Amended,
}

impl DocumentStatus {
    /// Get the wire text
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Interim => "interim",
            Self::Final => "final",
            Self::Amended => "amended",
        }
    }
}

/// The assembled document envelope
///
/// Created once per generation call; immutable after composition. The
/// template chain order is significant: consuming systems validate against
/// the exact sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentEnvelope {
    /// Logical document type
    pub document_type: DocumentType,
    /// Subtype, if one applies
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtype: Option<DocumentSubtype>,
    /// Ordered conformance template chain
    pub template_id_chain: Vec<TemplateId>,
    /// Document type concept
    pub type_code: CodedConcept,
    /// Document title
    pub title: String,
    /// Document instance identifier
    pub id: InstanceIdentifier,
    /// Identifier shared across versions of the same document
    #[serde(skip_serializing_if = "Option::is_none")]
    pub set_id: Option<InstanceIdentifier>,
    /// Version within the set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version_number: Option<u32>,
    /// Clinically effective time of the document
    pub effective_time: Timestamp,
    /// Lifecycle status
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<DocumentStatus>,
    /// Confidentiality code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidentiality: Option<CodedConcept>,
    /// Document-level authors
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub authors: Vec<Author>,
    /// Envelope-scoped coverage
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub coverages: Vec<Coverage>,
    /// Ordered sections
    pub sections: Vec<Section>,
}
