//! Entry values - the payload union a statement can carry

use octofhir_cda_types::{CodedConcept, PhysicalQuantity, QuantityInterval, Ratio};
use serde::{Deserialize, Serialize};

/// Reference to multimedia content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaReference {
    /// MIME type, e.g. application/pdf
    pub media_type: String,
    /// Reference to the content (URL or attachment id)
    pub reference: String,
    /// SHA-1 integrity check of the referenced bytes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub integrity_check: Option<String>,
}

impl MediaReference {
    /// Create a media reference
    pub fn new(media_type: impl Into<String>, reference: impl Into<String>) -> Self {
        Self {
            media_type: media_type.into(),
            reference: reference.into(),
            integrity_check: None,
        }
    }

    /// Attach an integrity check
    pub fn with_integrity_check(mut self, digest: impl Into<String>) -> Self {
        self.integrity_check = Some(digest.into());
        self
    }
}

/// A reference range attached to an observation value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceRange {
    /// The range itself
    pub range: QuantityInterval,
    /// What the range means, e.g. normal
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meaning: Option<CodedConcept>,
}

/// The value payload union of a clinical statement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum EntryValue {
    /// A coded value
    Coded(CodedConcept),
    /// A physical quantity
    Quantity(PhysicalQuantity),
    /// A ratio of quantities
    Ratio(Ratio),
    /// A quantity range
    Range(QuantityInterval),
    /// Plain text
    Text(String),
    /// A whole number
    Integer(i64),
    /// A boolean
    Boolean(bool),
    /// Multimedia content
    Media(MediaReference),
}

impl EntryValue {
    /// Get the coded value, if this is one
    pub fn as_coded(&self) -> Option<&CodedConcept> {
        match self {
            Self::Coded(concept) => Some(concept),
            _ => None,
        }
    }

    /// Get the quantity, if this is one
    pub fn as_quantity(&self) -> Option<&PhysicalQuantity> {
        match self {
            Self::Quantity(quantity) => Some(quantity),
            _ => None,
        }
    }

    /// Get the text, if this is one
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }
}

impl From<CodedConcept> for EntryValue {
    fn from(concept: CodedConcept) -> Self {
        Self::Coded(concept)
    }
}

impl From<PhysicalQuantity> for EntryValue {
    fn from(quantity: PhysicalQuantity) -> Self {
        Self::Quantity(quantity)
    }
}

impl From<String> for EntryValue {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for EntryValue {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}
