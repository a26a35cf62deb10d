//! Sections - one clinical topic, assembled once per document

use crate::{Author, ClinicalStatement, Coverage};
use octofhir_cda_types::{CodedConcept, TemplateId};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

/// The clinical topics a section can cover
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SectionTopic {
    /// Current and ceased medicines
    Medications,
    /// Adverse reactions and allergies
    AdverseReactions,
    /// Problems, diagnoses and past procedures
    MedicalHistory,
    /// Immunisation history
    Immunisations,
    /// Pathology test results
    PathologyResults,
    /// Diagnostic imaging results
    ImagingResults,
    /// Patient encounters
    Encounters,
    /// Links to related documents
    RelatedDocuments,
    /// Details of the event the document records
    EventDetails,
}

impl SectionTopic {
    /// Canonical camelCase topic name, used in validation issue details
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Medications => "medications",
            Self::AdverseReactions => "adverseReactions",
            Self::MedicalHistory => "medicalHistory",
            Self::Immunisations => "immunisations",
            Self::PathologyResults => "pathologyResults",
            Self::ImagingResults => "imagingResults",
            Self::Encounters => "encounters",
            Self::RelatedDocuments => "relatedDocuments",
            Self::EventDetails => "eventDetails",
        }
    }

    /// Topics that support an explicit exclusion statement
    ///
    /// An exclusion statement asserts "no data exists", as distinct from
    /// silently omitting the section.
    pub const fn supports_exclusion_statement(&self) -> bool {
        matches!(
            self,
            Self::Medications | Self::AdverseReactions | Self::MedicalHistory | Self::Immunisations
        )
    }
}

impl fmt::Display for SectionTopic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Where a section's narrative comes from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "source", content = "text", rename_all = "camelCase")]
pub enum NarrativeSource {
    /// Caller-supplied text, used verbatim
    Custom(String),
    /// Ask the external renderer, fed with the domain records
    Generated,
    /// Structure without narrative; clears title and text
    Suppressed,
}

/// A fully assembled section
///
/// Built once per clinical topic per document and immutable after the
/// assembler returns it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    /// The topic this section covers
    pub topic: SectionTopic,
    /// Section code from the document profile
    pub code: CodedConcept,
    /// Section title; None when suppressed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Conformance template identifiers, order-significant
    #[serde(skip_serializing_if = "SmallVec::is_empty", default)]
    pub template_ids: SmallVec<[TemplateId; 4]>,
    /// The narrative policy that was applied
    pub narrative: NarrativeSource,
    /// Resolved narrative text; None when suppressed or when generation
    /// produced nothing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Entry statements, insertion order preserved
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub entries: Vec<ClinicalStatement>,
    /// Nested subsections
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub subsections: Vec<Section>,
    /// Section-level authors
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub authors: Vec<Author>,
    /// Coverage attached to this section
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub coverages: Vec<Coverage>,
    /// True when the only entry is an exclusion statement
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub has_exclusion_statement: bool,
}

impl Section {
    /// True when the section carries neither entries nor an exclusion
    /// statement
    pub fn is_empty_of_content(&self) -> bool {
        self.entries.is_empty() && !self.has_exclusion_statement
    }
}
