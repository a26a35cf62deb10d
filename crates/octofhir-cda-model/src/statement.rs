//! Clinical statements - the nodes of the entry/relationship tree
//!
//! Every statement has a *kind*, and the kind alone fixes the structural
//! class/mood pair. Callers never supply class or mood codes; the original
//! mapping code risked a role/kind mismatch at each of its hundreds of call
//! sites, so the pair lives in exactly one table here.

use crate::{Author, EntryRelationship, EntryValue, Participant, Performer, ReferenceRange};
use octofhir_cda_types::{CodedConcept, InstanceIdentifier, TemplateId, TemporalValue};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

/// The kind of a clinical statement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatementKind {
    /// A measurement, finding or assertion
    Observation,
    /// A generic clinical act
    Act,
    /// A procedure performed on the subject
    Procedure,
    /// Administration of a substance (medication, immunisation)
    SubstanceAdministration,
    /// A grouping of related statements (battery, cluster)
    Organizer,
    /// Provision of a material (dispense)
    Supply,
    /// A patient encounter
    Encounter,
    /// Multimedia content referenced from the document
    ObservationMedia,
}

impl StatementKind {
    /// The fixed structural class code for this kind
    pub const fn class_code(&self) -> &'static str {
        match self {
            Self::Observation => "OBS",
            Self::Act => "ACT",
            Self::Procedure => "PROC",
            Self::SubstanceAdministration => "SBADM",
            Self::Organizer => "CLUSTER",
            Self::Supply => "SPLY",
            Self::Encounter => "ENC",
            Self::ObservationMedia => "OBS",
        }
    }

    /// The fixed structural mood code for this kind
    pub const fn mood_code(&self) -> &'static str {
        // Every supported document type records events that happened;
        // request moods are outside the supported set.
        "EVN"
    }

    /// Get the kind name
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Observation => "Observation",
            Self::Act => "Act",
            Self::Procedure => "Procedure",
            Self::SubstanceAdministration => "SubstanceAdministration",
            Self::Organizer => "Organizer",
            Self::Supply => "Supply",
            Self::Encounter => "Encounter",
            Self::ObservationMedia => "ObservationMedia",
        }
    }

    /// Kinds that structurally require a code
    pub const fn requires_code(&self) -> bool {
        matches!(
            self,
            Self::Observation | Self::Act | Self::Procedure | Self::Encounter
        )
    }
}

impl fmt::Display for StatementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Normalized statement status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StatementStatus {
    /// Ongoing
    Active,
    /// Finished normally
    Completed,
    /// Stopped before completion
    Aborted,
    /// Temporarily stopped
    Suspended,
}

impl StatementStatus {
    /// Get the wire text
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Completed => "completed",
            Self::Aborted => "aborted",
            Self::Suspended => "suspended",
        }
    }

    /// Normalize loosely recorded status text
    ///
    /// Clinical systems record status in many spellings; this maps the
    /// common ones onto the four normalized values.
    pub fn parse_loose(text: &str) -> Option<Self> {
        match text.trim().to_ascii_lowercase().as_str() {
            "active" | "current" | "ongoing" => Some(Self::Active),
            "completed" | "complete" | "done" | "finished" => Some(Self::Completed),
            "aborted" | "ceased" | "stopped" | "discontinued" => Some(Self::Aborted),
            "suspended" | "on hold" | "paused" => Some(Self::Suspended),
            _ => None,
        }
    }
}

impl fmt::Display for StatementStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A node in the entry/relationship tree
///
/// A statement exclusively owns its relationships; the structure is a tree,
/// not a graph, so cycles are impossible by construction. Instances are
/// created through [`crate::StatementBuilder`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClinicalStatement {
    /// Statement kind; fixes class and mood codes
    pub kind: StatementKind,
    /// Instance identifiers
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub ids: Vec<InstanceIdentifier>,
    /// Conformance template identifiers, order-significant
    #[serde(skip_serializing_if = "SmallVec::is_empty", default)]
    pub template_ids: SmallVec<[TemplateId; 4]>,
    /// What this statement is about
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<CodedConcept>,
    /// Normalized status
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<StatementStatus>,
    /// Clinically effective time
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effective_time: Option<TemporalValue>,
    /// Values carried by the statement, insertion order preserved
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub values: Vec<EntryValue>,
    /// Reference ranges for observation values
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub reference_ranges: Vec<ReferenceRange>,
    /// Narrative reference text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Route of administration (substance administrations)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route_code: Option<CodedConcept>,
    /// Dose per administration (substance administrations)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dose_quantity: Option<octofhir_cda_types::PhysicalQuantity>,
    /// Participating entities
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub participants: Vec<Participant>,
    /// Performing entities
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub performers: Vec<Performer>,
    /// Authoring entities
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub authors: Vec<Author>,
    /// Child statements with labelled edges, insertion order preserved
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub relationships: Vec<EntryRelationship>,
    /// Set by the builder when a kind that requires a code was built
    /// without one; collected by the composer's validation pass
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub missing_mandatory_code: bool,
}

impl ClinicalStatement {
    /// The fixed class code, a pure function of the kind
    pub const fn class_code(&self) -> &'static str {
        self.kind.class_code()
    }

    /// The fixed mood code, a pure function of the kind
    pub const fn mood_code(&self) -> &'static str {
        self.kind.mood_code()
    }

    /// Depth-first walk over this statement and all descendants
    pub fn walk(&self) -> StatementWalk<'_> {
        StatementWalk { stack: vec![self] }
    }
}

/// Depth-first iterator over a statement tree
pub struct StatementWalk<'a> {
    stack: Vec<&'a ClinicalStatement>,
}

impl<'a> Iterator for StatementWalk<'a> {
    type Item = &'a ClinicalStatement;

    fn next(&mut self) -> Option<Self::Item> {
        let next = self.stack.pop()?;
        // Push in reverse so children come back out in insertion order.
        for relationship in next.relationships.iter().rev() {
            self.stack.push(&relationship.statement);
        }
        Some(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_pair_is_pure_function_of_kind() {
        assert_eq!(StatementKind::Observation.class_code(), "OBS");
        assert_eq!(StatementKind::SubstanceAdministration.class_code(), "SBADM");
        assert_eq!(StatementKind::Organizer.class_code(), "CLUSTER");
        for kind in [
            StatementKind::Observation,
            StatementKind::Act,
            StatementKind::Procedure,
            StatementKind::SubstanceAdministration,
            StatementKind::Organizer,
            StatementKind::Supply,
            StatementKind::Encounter,
            StatementKind::ObservationMedia,
        ] {
            assert_eq!(kind.mood_code(), "EVN");
        }
    }

    #[test]
    fn test_status_normalization() {
        assert_eq!(
            StatementStatus::parse_loose("Ceased"),
            Some(StatementStatus::Aborted)
        );
        assert_eq!(
            StatementStatus::parse_loose(" current "),
            Some(StatementStatus::Active)
        );
        assert_eq!(StatementStatus::parse_loose("???"), None);
    }
}
