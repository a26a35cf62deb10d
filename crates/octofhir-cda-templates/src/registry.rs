//! Document profile registry
//!
//! The chain for every document type starts with the same two roots, the
//! document specification and the rendering specification, then appends
//! fixed per-(type, subtype) identifiers in table order. Callers can pin a
//! template package release, which lands last in the chain.

use crate::error::TemplateError;
use crate::sections::{section_def, SectionDef, LOINC};
use indexmap::IndexMap;
use octofhir_cda_model::{ConformanceProfile, DocumentSubtype, DocumentType, SectionTopic};
use octofhir_cda_types::{CodedConcept, TemplateId};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Document specification root, first link of every chain
pub const DOCUMENT_SPEC_ROOT: &str = "1.2.36.1.2001.1001.100.1002.4";
/// Rendering specification root, second link of every chain
pub const RENDERING_SPEC_ROOT: &str = "1.2.36.1.2001.1001.100.149";
/// Appended after the per-type identifiers for narrative-only renditions
pub const NARRATIVE_ONLY_ROOT: &str = "1.2.36.1.2001.1001.100.1002.141";

fn tid(root: &str, extension: &str) -> TemplateId {
    TemplateId {
        root: root.to_string(),
        extension: Some(extension.to_string()),
    }
}

/// Everything the assembler and composer need for one document type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentProfile {
    /// Resolved document type
    pub document_type: DocumentType,
    /// Resolved subtype
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtype: Option<DocumentSubtype>,
    /// Conformance rendition the chain encodes
    pub profile: ConformanceProfile,
    /// Full template chain, order-significant
    pub template_id_chain: Vec<TemplateId>,
    /// Document type code
    pub type_code: CodedConcept,
    /// Default document title
    pub default_title: String,
    /// Section definitions for the topics this type carries, in document
    /// order
    pub section_defs: IndexMap<SectionTopic, SectionDef>,
    /// Topics that must carry entries or an exclusion statement
    pub mandatory_topics: Vec<SectionTopic>,
}

impl DocumentProfile {
    /// The section definition for a topic, if the type carries it
    pub fn section_def(&self, topic: SectionTopic) -> Option<&SectionDef> {
        self.section_defs.get(&topic)
    }

    /// True when the topic must carry entries or an exclusion statement
    pub fn is_mandatory(&self, topic: SectionTopic) -> bool {
        self.mandatory_topics.contains(&topic)
    }
}

/// Selects which profile to resolve
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentSelector {
    /// The logical document type
    pub document_type: DocumentType,
    /// Subtype, where the type has them
    pub subtype: Option<DocumentSubtype>,
    /// Conformance rendition
    pub profile: ConformanceProfile,
    /// Caller-pinned template package release, appended last
    pub package: Option<TemplateId>,
}

impl DocumentSelector {
    /// Select the structured rendition of a document type
    pub fn new(document_type: DocumentType) -> Self {
        Self {
            document_type,
            subtype: None,
            profile: ConformanceProfile::default(),
            package: None,
        }
    }

    /// Refine the type with a subtype
    pub fn with_subtype(mut self, subtype: DocumentSubtype) -> Self {
        self.subtype = Some(subtype);
        self
    }

    /// Pick a conformance rendition
    pub fn with_profile(mut self, profile: ConformanceProfile) -> Self {
        self.profile = profile;
        self
    }

    /// Pin a template package release
    pub fn with_package(mut self, package: TemplateId) -> Self {
        self.package = Some(package);
        self
    }
}

struct ProfileEntry {
    appends: Vec<TemplateId>,
    type_code: CodedConcept,
    default_title: &'static str,
    topics: Vec<SectionTopic>,
    mandatory: Vec<SectionTopic>,
}

// Displayed names that differ from the terminology release for specific
// document types. Confirmed against the governing standard, not inferred.
static DISPLAY_NAME_OVERRIDES: &[(DocumentType, &str)] = &[
    (DocumentType::DischargeSummary, "Discharge Summarization Note"),
    (
        DocumentType::ConsumerEnteredHealthSummary,
        "Consumer Entered Health Summary",
    ),
];

fn type_code(document_type: DocumentType, code: &str, display: &str) -> CodedConcept {
    let display = DISPLAY_NAME_OVERRIDES
        .iter()
        .find(|(t, _)| *t == document_type)
        .map(|(_, d)| *d)
        .unwrap_or(display);
    CodedConcept::coded(code, LOINC, display)
}

type ProfileKey = (DocumentType, Option<DocumentSubtype>);

static PROFILES: Lazy<IndexMap<ProfileKey, ProfileEntry>> = Lazy::new(|| {
    use DocumentType::*;
    use SectionTopic::*;

    let mut table = IndexMap::new();

    table.insert(
        (SharedHealthSummary, None),
        ProfileEntry {
            appends: vec![tid("1.2.36.1.2001.1001.100.1002.120", "1.4")],
            type_code: type_code(SharedHealthSummary, "60591-5", "Patient Summary Document"),
            default_title: "Shared Health Summary",
            topics: vec![AdverseReactions, Medications, MedicalHistory, Immunisations],
            mandatory: vec![AdverseReactions, Medications, MedicalHistory, Immunisations],
        },
    );

    table.insert(
        (EventSummary, None),
        ProfileEntry {
            appends: vec![tid("1.2.36.1.2001.1001.100.1002.136", "1.3")],
            type_code: type_code(EventSummary, "34133-9", "Summarization of episode note"),
            default_title: "Event Summary",
            topics: vec![
                EventDetails,
                AdverseReactions,
                Medications,
                Immunisations,
                PathologyResults,
                ImagingResults,
            ],
            mandatory: vec![EventDetails],
        },
    );

    table.insert(
        (EReferral, None),
        ProfileEntry {
            appends: vec![tid("1.2.36.1.2001.1001.100.1002.2", "1.3")],
            type_code: type_code(EReferral, "57133-1", "Referral note"),
            default_title: "e-Referral",
            topics: vec![
                AdverseReactions,
                Medications,
                MedicalHistory,
                PathologyResults,
                ImagingResults,
            ],
            mandatory: vec![AdverseReactions, Medications],
        },
    );

    table.insert(
        (SpecialistLetter, None),
        ProfileEntry {
            appends: vec![tid("1.2.36.1.2001.1001.100.1002.215", "1.3")],
            type_code: type_code(SpecialistLetter, "51852-2", "Letter"),
            default_title: "Specialist Letter",
            topics: vec![
                EventDetails,
                AdverseReactions,
                Medications,
                PathologyResults,
                ImagingResults,
            ],
            mandatory: vec![EventDetails],
        },
    );

    table.insert(
        (DischargeSummary, None),
        ProfileEntry {
            appends: vec![tid("1.2.36.1.2001.1001.100.1002.4.2", "3.4")],
            type_code: type_code(DischargeSummary, "18842-5", "Discharge summary"),
            default_title: "Discharge Summary",
            topics: vec![
                EventDetails,
                AdverseReactions,
                Medications,
                MedicalHistory,
                Encounters,
            ],
            mandatory: vec![AdverseReactions, Medications],
        },
    );

    table.insert(
        (AdvanceCareInformation, Some(DocumentSubtype::GoalsOfCare)),
        ProfileEntry {
            appends: vec![
                tid("1.2.36.1.2001.1001.100.1002.226", "1.0"),
                tid("1.2.36.1.2001.1001.100.1002.258", "1.0"),
            ],
            type_code: type_code(AdvanceCareInformation, "100821-8", "Goals of care"),
            default_title: "Goals of Care Document",
            topics: vec![RelatedDocuments],
            mandatory: vec![RelatedDocuments],
        },
    );

    table.insert(
        (
            AdvanceCareInformation,
            Some(DocumentSubtype::AdvanceCarePlanning),
        ),
        ProfileEntry {
            appends: vec![
                tid("1.2.36.1.2001.1001.100.1002.226", "1.0"),
                tid("1.2.36.1.2001.1001.100.1002.257", "1.0"),
            ],
            type_code: type_code(AdvanceCareInformation, "42348-3", "Advance directives"),
            default_title: "Advance Care Information",
            topics: vec![RelatedDocuments],
            mandatory: vec![RelatedDocuments],
        },
    );

    table.insert(
        (PathologyReport, None),
        ProfileEntry {
            appends: vec![tid("1.2.36.1.2001.1001.100.1002.220", "1.0")],
            type_code: type_code(PathologyReport, "11526-1", "Pathology study"),
            default_title: "Pathology Report",
            topics: vec![PathologyResults, RelatedDocuments],
            mandatory: vec![PathologyResults],
        },
    );

    table.insert(
        (DiagnosticImagingReport, None),
        ProfileEntry {
            appends: vec![tid("1.2.36.1.2001.1001.100.1002.222", "1.0")],
            type_code: type_code(
                DiagnosticImagingReport,
                "18748-4",
                "Diagnostic imaging study",
            ),
            default_title: "Diagnostic Imaging Report",
            topics: vec![ImagingResults, RelatedDocuments],
            mandatory: vec![ImagingResults],
        },
    );

    table.insert(
        (ConsumerEnteredHealthSummary, None),
        ProfileEntry {
            appends: vec![tid("1.2.36.1.2001.1001.100.1002.12", "1.2")],
            type_code: type_code(ConsumerEnteredHealthSummary, "60591-5", "Patient Summary Document"),
            default_title: "Consumer Entered Health Summary",
            topics: vec![AdverseReactions, Medications],
            mandatory: vec![],
        },
    );

    table
});

/// Types whose table entries are keyed by subtype
const SUBTYPED: &[DocumentType] = &[DocumentType::AdvanceCareInformation];

/// Resolve a selector to its document profile
///
/// Deterministic and idempotent: identical selectors yield identical
/// profiles with identical chain order. An unknown (type, subtype)
/// combination returns an error the composer reports as a
/// template-chain conflict.
pub fn resolve(selector: &DocumentSelector) -> Result<DocumentProfile, TemplateError> {
    let key = (selector.document_type, selector.subtype);
    let entry = PROFILES.get(&key).ok_or_else(|| {
        if SUBTYPED.contains(&selector.document_type) && selector.subtype.is_none() {
            TemplateError::SubtypeRequired {
                document_type: selector.document_type,
            }
        } else {
            TemplateError::UnknownCombination {
                document_type: selector.document_type,
                subtype: selector.subtype,
            }
        }
    })?;

    let mut chain = vec![tid(DOCUMENT_SPEC_ROOT, "1.0"), tid(RENDERING_SPEC_ROOT, "1.0")];
    chain.extend(entry.appends.iter().cloned());
    if selector.profile == ConformanceProfile::NarrativeOnly {
        chain.push(tid(NARRATIVE_ONLY_ROOT, "1.0"));
    }
    if let Some(package) = &selector.package {
        chain.push(package.clone());
    }

    let section_defs = entry
        .topics
        .iter()
        .map(|topic| (*topic, section_def(*topic)))
        .collect();

    Ok(DocumentProfile {
        document_type: selector.document_type,
        subtype: selector.subtype,
        profile: selector.profile,
        template_id_chain: chain,
        type_code: entry.type_code.clone(),
        default_title: entry.default_title.to_string(),
        section_defs,
        mandatory_topics: entry.mandatory.clone(),
    })
}
