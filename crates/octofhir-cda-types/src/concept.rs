//! Coded concepts - the null-flavor-safe coded data element
//!
//! A [`CodedConcept`] carries a code from a coding system together with
//! display text, free text, translations into other systems, and name/value
//! qualifiers. The builder never rejects input: a concept with nothing in it
//! and no null flavor is returned flagged *incomplete*, and the composer's
//! validation pass decides whether that is an error for the document type at
//! hand.

use crate::NullFlavor;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Completeness of a coded concept
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Completeness {
    /// At least one of code, system, display or text is present, or an
    /// explicit null flavor states why none is
    Complete,
    /// Nothing is present and no null flavor was supplied
    Incomplete,
}

/// A name/value qualifier refining a coded concept
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConceptQualifier {
    /// Qualifier name, e.g. laterality
    pub name: CodedConcept,
    /// Qualifier value, e.g. left
    pub value: CodedConcept,
}

/// A coded data element with deterministic null-flavor fallback
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodedConcept {
    /// Code within the coding system
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Coding system identifier (OID)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code_system: Option<String>,
    /// Coding system name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code_system_name: Option<String>,
    /// Coding system version
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code_system_version: Option<String>,
    /// Display name for the code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Free text as originally recorded, preserved verbatim
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_text: Option<String>,
    /// Translations of this concept into other coding systems
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub translations: Vec<CodedConcept>,
    /// Name/value qualifiers
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub qualifiers: Vec<ConceptQualifier>,
    /// Reason no real value is given
    #[serde(skip_serializing_if = "Option::is_none")]
    pub null_flavor: Option<NullFlavor>,
}

impl CodedConcept {
    /// Create a fully coded concept
    pub fn coded(
        code: impl Into<String>,
        code_system: impl Into<String>,
        display_name: impl Into<String>,
    ) -> Self {
        ConceptBuilder::new()
            .code(code)
            .code_system(code_system)
            .display_name(display_name)
            .build()
    }

    /// Create a text-only concept
    pub fn text(original_text: impl Into<String>) -> Self {
        ConceptBuilder::new().original_text(original_text).build()
    }

    /// Create a concept that is nothing but a null flavor
    pub fn null(flavor: NullFlavor) -> Self {
        ConceptBuilder::new().null_flavor(flavor).build()
    }

    /// True when no code, system, display or text is present
    pub fn is_empty(&self) -> bool {
        self.code.is_none()
            && self.code_system.is_none()
            && self.display_name.is_none()
            && self.original_text.is_none()
    }

    /// Completeness per the builder contract
    pub fn completeness(&self) -> Completeness {
        if self.is_empty() && self.null_flavor.is_none() {
            Completeness::Incomplete
        } else {
            Completeness::Complete
        }
    }

    /// True when the concept is flagged incomplete
    pub fn is_incomplete(&self) -> bool {
        self.completeness() == Completeness::Incomplete
    }

    /// Preferred human-readable text: display name, then original text
    pub fn preferred_text(&self) -> Option<&str> {
        self.display_name
            .as_deref()
            .or(self.original_text.as_deref())
    }
}

impl fmt::Display for CodedConcept {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(flavor) = self.null_flavor {
            if self.is_empty() {
                return write!(f, "[{}]", flavor.code());
            }
        }
        match (&self.code, self.preferred_text()) {
            (Some(code), Some(text)) => write!(f, "{code} \"{text}\""),
            (Some(code), None) => write!(f, "{code}"),
            (None, Some(text)) => write!(f, "\"{text}\""),
            (None, None) => write!(f, "[incomplete]"),
        }
    }
}

/// Fluent builder for [`CodedConcept`]
///
/// Building is deterministic: identical inputs produce structurally
/// identical output.
#[derive(Debug, Clone, Default)]
pub struct ConceptBuilder {
    code: Option<String>,
    code_system: Option<String>,
    code_system_name: Option<String>,
    code_system_version: Option<String>,
    display_name: Option<String>,
    original_text: Option<String>,
    translations: Vec<CodedConcept>,
    qualifiers: Vec<ConceptQualifier>,
    null_flavor: Option<NullFlavor>,
}

impl ConceptBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the code
    pub fn code(mut self, code: impl Into<String>) -> Self {
        self.code = some_nonempty(code);
        self
    }

    /// Set the coding system identifier
    pub fn code_system(mut self, system: impl Into<String>) -> Self {
        self.code_system = some_nonempty(system);
        self
    }

    /// Set the coding system name
    pub fn code_system_name(mut self, name: impl Into<String>) -> Self {
        self.code_system_name = some_nonempty(name);
        self
    }

    /// Set the coding system version
    pub fn code_system_version(mut self, version: impl Into<String>) -> Self {
        self.code_system_version = some_nonempty(version);
        self
    }

    /// Set the display name
    pub fn display_name(mut self, display: impl Into<String>) -> Self {
        self.display_name = some_nonempty(display);
        self
    }

    /// Set the original text, preserved verbatim regardless of length
    pub fn original_text(mut self, text: impl Into<String>) -> Self {
        self.original_text = some_nonempty(text);
        self
    }

    /// Append a translation into another coding system
    pub fn translation(mut self, concept: CodedConcept) -> Self {
        self.translations.push(concept);
        self
    }

    /// Append a name/value qualifier
    pub fn qualifier(mut self, name: CodedConcept, value: CodedConcept) -> Self {
        self.qualifiers.push(ConceptQualifier { name, value });
        self
    }

    /// Set an explicit null flavor
    pub fn null_flavor(mut self, flavor: NullFlavor) -> Self {
        self.null_flavor = Some(flavor);
        self
    }

    /// Build the concept
    ///
    /// Never fails. An all-empty build without a null flavor yields a
    /// concept whose `completeness()` is [`Completeness::Incomplete`].
    pub fn build(self) -> CodedConcept {
        CodedConcept {
            code: self.code,
            code_system: self.code_system,
            code_system_name: self.code_system_name,
            code_system_version: self.code_system_version,
            display_name: self.display_name,
            original_text: self.original_text,
            translations: self.translations,
            qualifiers: self.qualifiers,
            null_flavor: self.null_flavor,
        }
    }
}

/// Treat empty strings as absent so `Some("")` never masquerades as content
fn some_nonempty(value: impl Into<String>) -> Option<String> {
    let value = value.into();
    if value.is_empty() { None } else { Some(value) }
}
