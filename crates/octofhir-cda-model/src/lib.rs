//! CDA clinical statement tree
//!
//! This crate defines the recursive entry/relationship tree that sections
//! carry, and the section/envelope types the composer produces:
//! - [`ClinicalStatement`] with a fixed class/mood pair per [`StatementKind`]
//! - [`EntryRelationship`] labelled edges, created only by the builder
//! - [`StatementBuilder`], the single place role pairs are assigned
//! - [`Section`], [`Coverage`] and [`DocumentEnvelope`]

pub mod builder;
pub mod coverage;
pub mod document;
pub mod participation;
pub mod relationship;
pub mod section;
pub mod statement;
pub mod value;

pub use builder::*;
pub use coverage::*;
pub use document::*;
pub use participation::*;
pub use relationship::*;
pub use section::*;
pub use statement::*;
pub use value::*;
