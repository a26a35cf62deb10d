//! Entry relationships - labelled edges of the statement tree
//!
//! The relationship type states *why* a child statement relates to its
//! parent. Codes follow the HL7 v3 ActRelationshipType vocabulary.

use crate::ClinicalStatement;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Why a child statement relates to its parent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RelationshipType {
    /// The child is a component of the parent
    Component,
    /// The child is the reason for the parent
    Reason,
    /// The child is the subject of the parent
    Subject,
    /// The child is referenced by the parent
    Reference,
    /// The child caused the parent
    Cause,
    /// The child is a manifestation of the parent
    Manifestation,
    /// The child supports the parent as evidence
    SupportEvidence,
    /// The child starts after the start of the parent
    StartsAfterStart,
}

impl RelationshipType {
    /// Get the wire code
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Component => "COMP",
            Self::Reason => "RSON",
            Self::Subject => "SUBJ",
            Self::Reference => "REFR",
            Self::Cause => "CAUS",
            Self::Manifestation => "MFST",
            Self::SupportEvidence => "SPRT",
            Self::StartsAfterStart => "SAS",
        }
    }
}

impl fmt::Display for RelationshipType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A labelled edge wrapping a child statement
///
/// Created only by [`crate::StatementBuilder`]; destroyed with its parent.
/// Sibling order is insertion order and is semantically significant for
/// narrative fallback and downstream schema validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryRelationship {
    /// Why the child relates to the parent
    pub relationship_type: RelationshipType,
    /// True when the semantic direction is reversed
    pub inverted: bool,
    /// The child statement, exclusively owned
    pub statement: ClinicalStatement,
}

impl EntryRelationship {
    /// Wrap a child statement in a labelled edge
    pub fn new(
        relationship_type: RelationshipType,
        inverted: bool,
        statement: ClinicalStatement,
    ) -> Self {
        Self {
            relationship_type,
            inverted,
            statement,
        }
    }
}
