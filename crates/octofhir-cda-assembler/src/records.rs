//! Domain records - the typed inputs callers hand to the assembler
//!
//! One record family per clinical topic. Records are deliberately plain:
//! optional fields stay `None` when a source system has no data, and the
//! entry builders translate absence into absence of tree nodes, never into
//! nodes with nulled-out fields.

use crate::exclusion::ExclusionReason;
use octofhir_cda_model::{Author, Coverage, CoverageRole, MediaReference, NarrativeSource, SectionTopic};
use octofhir_cda_types::{
    CodedConcept, InstanceIdentifier, PhysicalQuantity, QuantityInterval, TemporalValue, Timestamp,
};
use serde::{Deserialize, Serialize};

/// A medicine the subject takes or took
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Medication {
    /// The medicine itself
    pub medicine: CodedConcept,
    /// Dosage directions as recorded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub directions: Option<String>,
    /// Route of administration
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route: Option<CodedConcept>,
    /// Dose per administration
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dose: Option<PhysicalQuantity>,
    /// Status text as recorded by the source system
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_text: Option<String>,
    /// Period the medicine was or is taken
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<TemporalValue>,
    /// Clinical indication
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<CodedConcept>,
    /// Source system identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<InstanceIdentifier>,
}

impl Medication {
    /// Create a medication record
    pub fn new(medicine: CodedConcept) -> Self {
        Self {
            medicine,
            directions: None,
            route: None,
            dose: None,
            status_text: None,
            period: None,
            reason: None,
            id: None,
        }
    }
}

/// An adverse reaction to an agent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdverseReaction {
    /// The causative agent
    pub agent: CodedConcept,
    /// Observed manifestations
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub manifestations: Vec<CodedConcept>,
    /// Reaction type, e.g. allergy vs intolerance
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reaction_type: Option<CodedConcept>,
    /// When the reaction was first observed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub onset: Option<Timestamp>,
}

impl AdverseReaction {
    /// Create an adverse reaction record
    pub fn new(agent: CodedConcept) -> Self {
        Self {
            agent,
            manifestations: Vec::new(),
            reaction_type: None,
            onset: None,
        }
    }
}

/// What kind of history item a record describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HistoryKind {
    /// A problem or diagnosis
    Problem,
    /// A procedure performed on the subject
    Procedure,
    /// Any other clinically relevant event
    OtherEvent,
}

/// One item of medical history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicalHistoryItem {
    /// Problem, procedure or other event
    pub kind: HistoryKind,
    /// What happened
    pub code: CodedConcept,
    /// When it applied; problems may span an interval, procedures are
    /// usually instants
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interval: Option<TemporalValue>,
    /// Free-text comment
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl MedicalHistoryItem {
    /// Create a problem/diagnosis item
    pub fn problem(code: CodedConcept) -> Self {
        Self {
            kind: HistoryKind::Problem,
            code,
            interval: None,
            comment: None,
        }
    }

    /// Create a procedure item
    pub fn procedure(code: CodedConcept) -> Self {
        Self {
            kind: HistoryKind::Procedure,
            code,
            interval: None,
            comment: None,
        }
    }

    /// Set the interval the item applies to
    pub fn during(mut self, interval: TemporalValue) -> Self {
        self.interval = Some(interval);
        self
    }
}

/// An administered immunisation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Immunisation {
    /// The vaccine
    pub vaccine: CodedConcept,
    /// Dose sequence number within the schedule
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sequence_number: Option<u32>,
    /// When it was administered
    #[serde(skip_serializing_if = "Option::is_none")]
    pub administered: Option<Timestamp>,
}

impl Immunisation {
    /// Create an immunisation record
    pub fn new(vaccine: CodedConcept) -> Self {
        Self {
            vaccine,
            sequence_number: None,
            administered: None,
        }
    }
}

/// One measured analyte within a pathology result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Analyte {
    /// What was measured
    pub code: CodedConcept,
    /// The measured quantity
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<PhysicalQuantity>,
    /// Non-numeric result text, used when no quantity applies
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_text: Option<String>,
    /// Normal range for the measurement
    #[serde(skip_serializing_if = "Option::is_none")]
    pub normal_range: Option<QuantityInterval>,
    /// Interpretation flag, e.g. high
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interpretation: Option<CodedConcept>,
}

impl Analyte {
    /// Create an analyte with a quantitative result
    pub fn quantitative(code: CodedConcept, value: PhysicalQuantity) -> Self {
        Self {
            code,
            value: Some(value),
            value_text: None,
            normal_range: None,
            interpretation: None,
        }
    }

    /// Create an analyte with a textual result
    pub fn textual(code: CodedConcept, text: impl Into<String>) -> Self {
        Self {
            code,
            value: None,
            value_text: Some(text.into()),
            normal_range: None,
            interpretation: None,
        }
    }

    /// Set the normal range
    pub fn with_normal_range(mut self, range: QuantityInterval) -> Self {
        self.normal_range = Some(range);
        self
    }
}

/// One pathology report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathologyResult {
    /// The ordered test or panel
    pub test: CodedConcept,
    /// Specimen description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specimen: Option<CodedConcept>,
    /// When the specimen was collected
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collected: Option<Timestamp>,
    /// Report status text as recorded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_text: Option<String>,
    /// The individual measurements
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub analytes: Vec<Analyte>,
}

impl PathologyResult {
    /// Create a pathology result record
    pub fn new(test: CodedConcept) -> Self {
        Self {
            test,
            specimen: None,
            collected: None,
            status_text: None,
            analytes: Vec::new(),
        }
    }

    /// Append an analyte
    pub fn with_analyte(mut self, analyte: Analyte) -> Self {
        self.analytes.push(analyte);
        self
    }
}

/// One diagnostic imaging report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImagingResult {
    /// The examination performed
    pub examination: CodedConcept,
    /// Imaging modality, e.g. CT
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modality: Option<CodedConcept>,
    /// Anatomical site imaged
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anatomical_site: Option<CodedConcept>,
    /// When the examination was performed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub performed: Option<Timestamp>,
    /// Findings text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub findings: Option<String>,
}

impl ImagingResult {
    /// Create an imaging result record
    pub fn new(examination: CodedConcept) -> Self {
        Self {
            examination,
            modality: None,
            anatomical_site: None,
            performed: None,
            findings: None,
        }
    }
}

/// One patient encounter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncounterRecord {
    /// Kind of encounter
    pub encounter_type: CodedConcept,
    /// When the encounter took place
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<TemporalValue>,
    /// Where it took place
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_name: Option<String>,
}

impl EncounterRecord {
    /// Create an encounter record
    pub fn new(encounter_type: CodedConcept) -> Self {
        Self {
            encounter_type,
            period: None,
            location_name: None,
        }
    }
}

/// A reference to another document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelatedDocument {
    /// The referenced content
    pub media: MediaReference,
    /// Document type of the target
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_code: Option<CodedConcept>,
    /// Displayable title of the target
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl RelatedDocument {
    /// Create a related document record
    pub fn new(media: MediaReference) -> Self {
        Self {
            media,
            document_code: None,
            title: None,
        }
    }
}

/// Details of the healthcare event a document records
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDetail {
    /// What happened
    pub description: String,
    /// When it happened
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<TemporalValue>,
    /// Coded characterisation of the event
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<CodedConcept>,
}

impl EventDetail {
    /// Create an event detail record
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            period: None,
            code: None,
        }
    }
}

/// One entitlement to aggregate into coverage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntitlementInput {
    /// Who holds the entitlement
    pub owner: InstanceIdentifier,
    /// Under which role
    pub role: CoverageRole,
    /// Kind of entitlement
    pub code: CodedConcept,
    /// Entitlement instance identifier, e.g. a card number
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<InstanceIdentifier>,
    /// Validity period
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validity: Option<TemporalValue>,
}

impl EntitlementInput {
    /// Create an entitlement input
    pub fn new(owner: InstanceIdentifier, role: CoverageRole, code: CodedConcept) -> Self {
        Self {
            owner,
            role,
            code,
            id: None,
            validity: None,
        }
    }
}

/// The record family for one topic
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "topic", content = "records", rename_all = "camelCase")]
pub enum TopicRecords {
    /// Medication records
    Medications(Vec<Medication>),
    /// Adverse reaction records
    AdverseReactions(Vec<AdverseReaction>),
    /// Medical history items
    MedicalHistory(Vec<MedicalHistoryItem>),
    /// Immunisation records
    Immunisations(Vec<Immunisation>),
    /// Pathology results
    PathologyResults(Vec<PathologyResult>),
    /// Imaging results
    ImagingResults(Vec<ImagingResult>),
    /// Encounters
    Encounters(Vec<EncounterRecord>),
    /// Related document references
    RelatedDocuments(Vec<RelatedDocument>),
    /// Event details
    EventDetails(Vec<EventDetail>),
}

impl TopicRecords {
    /// The topic these records belong to
    pub const fn topic(&self) -> SectionTopic {
        match self {
            Self::Medications(_) => SectionTopic::Medications,
            Self::AdverseReactions(_) => SectionTopic::AdverseReactions,
            Self::MedicalHistory(_) => SectionTopic::MedicalHistory,
            Self::Immunisations(_) => SectionTopic::Immunisations,
            Self::PathologyResults(_) => SectionTopic::PathologyResults,
            Self::ImagingResults(_) => SectionTopic::ImagingResults,
            Self::Encounters(_) => SectionTopic::Encounters,
            Self::RelatedDocuments(_) => SectionTopic::RelatedDocuments,
            Self::EventDetails(_) => SectionTopic::EventDetails,
        }
    }

    /// Number of records
    pub fn len(&self) -> usize {
        match self {
            Self::Medications(r) => r.len(),
            Self::AdverseReactions(r) => r.len(),
            Self::MedicalHistory(r) => r.len(),
            Self::Immunisations(r) => r.len(),
            Self::PathologyResults(r) => r.len(),
            Self::ImagingResults(r) => r.len(),
            Self::Encounters(r) => r.len(),
            Self::RelatedDocuments(r) => r.len(),
            Self::EventDetails(r) => r.len(),
        }
    }

    /// True when no records are present
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Everything the assembler needs for one section
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicInput {
    /// The domain records for the topic
    pub records: TopicRecords,
    /// Narrative policy
    pub narrative: NarrativeSource,
    /// Exclusion value to emit when no entries are built and the topic
    /// supports one
    pub exclusion: Option<ExclusionReason>,
    /// Section-level authors
    pub authors: Vec<Author>,
    /// Coverage attached to the section
    pub coverages: Vec<Coverage>,
}

impl TopicInput {
    /// Create an input with generated narrative and no exclusion value
    pub fn new(records: TopicRecords) -> Self {
        Self {
            records,
            narrative: NarrativeSource::Generated,
            exclusion: None,
            authors: Vec::new(),
            coverages: Vec::new(),
        }
    }

    /// Set the narrative policy
    pub fn with_narrative(mut self, narrative: NarrativeSource) -> Self {
        self.narrative = narrative;
        self
    }

    /// Supply the exclusion value for an empty section
    pub fn with_exclusion(mut self, reason: ExclusionReason) -> Self {
        self.exclusion = Some(reason);
        self
    }

    /// Append a section-level author
    pub fn with_author(mut self, author: Author) -> Self {
        self.authors.push(author);
        self
    }

    /// Attach coverage to the section
    pub fn with_coverage(mut self, coverage: Coverage) -> Self {
        self.coverages.push(coverage);
        self
    }
}
