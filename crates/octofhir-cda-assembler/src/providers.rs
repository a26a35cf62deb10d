//! External collaborators the assembler depends on
//!
//! Identifier generation, terminology lookup and narrative rendering are
//! environment concerns, so they sit behind traits and the pipeline takes
//! them through an [`AssemblyContext`]. The narrative renderer receives the
//! domain records a section was built from, never the built tree, so prose
//! and entries cannot drift apart.

use crate::records::TopicRecords;
use octofhir_cda_model::SectionTopic;
use octofhir_cda_types::{IdentifierError, InstanceIdentifier};
use std::sync::atomic::{AtomicU64, Ordering};

/// Generates instance identifiers for statements that arrive without one
pub trait IdentifierProvider: Send + Sync {
    /// Produce the next identifier
    fn next_id(&self) -> InstanceIdentifier;
}

/// Looks up display names for coded concepts
pub trait TerminologyProvider: Send + Sync {
    /// The preferred display name for a code, if the terminology knows it
    fn display_name(&self, code_system: &str, code: &str) -> Option<String>;
}

/// Renders section narrative from domain records
pub trait NarrativeRenderer: Send + Sync {
    /// Render narrative text, or `None` when nothing sensible can be said
    fn render(&self, topic: SectionTopic, records: &TopicRecords) -> Option<String>;
}

/// Identifier provider issuing sequential extensions under one OID root
pub struct OidIdentifierProvider {
    root: String,
    counter: AtomicU64,
}

impl OidIdentifierProvider {
    /// Create a provider with a validated OID root
    pub fn new(root: impl Into<String>) -> Result<Self, IdentifierError> {
        let id = InstanceIdentifier::new(root)?;
        Ok(Self {
            root: id.root,
            counter: AtomicU64::new(1),
        })
    }
}

impl IdentifierProvider for OidIdentifierProvider {
    fn next_id(&self) -> InstanceIdentifier {
        let n = self.counter.fetch_add(1, Ordering::Relaxed);
        InstanceIdentifier {
            root: self.root.clone(),
            extension: Some(n.to_string()),
            assigning_authority_name: None,
        }
    }
}

/// Terminology provider that knows nothing
pub struct NullTerminology;

impl TerminologyProvider for NullTerminology {
    fn display_name(&self, _code_system: &str, _code: &str) -> Option<String> {
        None
    }
}

/// Narrative renderer that never produces text
pub struct SilentRenderer;

impl NarrativeRenderer for SilentRenderer {
    fn render(&self, _topic: SectionTopic, _records: &TopicRecords) -> Option<String> {
        None
    }
}

/// The collaborators one assembly run uses
#[derive(Clone, Copy)]
pub struct AssemblyContext<'a> {
    /// Identifier generation
    pub identifiers: &'a dyn IdentifierProvider,
    /// Terminology lookup
    pub terminology: &'a dyn TerminologyProvider,
    /// Narrative rendering
    pub renderer: &'a dyn NarrativeRenderer,
}

impl<'a> AssemblyContext<'a> {
    /// Create a context
    pub fn new(
        identifiers: &'a dyn IdentifierProvider,
        terminology: &'a dyn TerminologyProvider,
        renderer: &'a dyn NarrativeRenderer,
    ) -> Self {
        Self {
            identifiers,
            terminology,
            renderer,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_identifiers_are_distinct() {
        let provider = OidIdentifierProvider::new("1.2.36.1.2001.1005.41").unwrap();
        let a = provider.next_id();
        let b = provider.next_id();
        assert_eq!(a.root, b.root);
        assert_ne!(a.extension, b.extension);
    }

    #[test]
    fn test_invalid_root_is_rejected() {
        assert!(OidIdentifierProvider::new("not.an..oid").is_err());
    }
}
