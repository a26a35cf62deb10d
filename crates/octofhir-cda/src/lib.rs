//! CDA clinical document assembly for Rust
//!
//! This crate assembles HL7 CDA clinical documents from typed domain
//! records:
//! - Coded, temporal and quantity data elements with deferred validation
//! - A clinical statement tree with fixed structural roles per kind
//! - A table-driven document profile resolver
//! - Section assembly with exclusion statements and narrative policies
//! - Entitlement aggregation into coverage
//! - Envelope composition with a single validation pass
//!
//! # Example
//!
//! ```ignore
//! use octofhir_cda::assembler::{compose, DocumentMeta, SectionAssembler, TopicInput, TopicRecords};
//! use octofhir_cda::templates::{resolve, DocumentSelector};
//! use octofhir_cda::model::DocumentType;
//!
//! let selector = DocumentSelector::new(DocumentType::EventSummary);
//! let profile = resolve(&selector)?;
//! let mut assembler = SectionAssembler::new(&profile, ctx);
//! let section = assembler.assemble(&TopicInput::new(records))?;
//! let composition = compose(meta, vec![section])?;
//! ```

// Re-export all public APIs from internal crates
pub use octofhir_cda_assembler as assembler;
pub use octofhir_cda_diagnostics as diagnostics;
pub use octofhir_cda_model as model;
pub use octofhir_cda_templates as templates;
pub use octofhir_cda_types as types;

// Convenience re-exports
pub use octofhir_cda_assembler::{aggregate, compose, Composition, DocumentMeta, SectionAssembler};
pub use octofhir_cda_diagnostics::{CdaError, Result, ValidationFailure};
pub use octofhir_cda_model::{DocumentEnvelope, DocumentType, Section, StatementBuilder};
pub use octofhir_cda_templates::{resolve, DocumentSelector};
