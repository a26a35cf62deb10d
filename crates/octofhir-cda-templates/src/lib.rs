//! Document profile resolver
//!
//! Maps a document-type selector to its conformance template chain, type
//! code, default title, section definitions and mandatory topics. Every
//! lookup is a pure table read: chains, codes and titles live in static
//! tables, so two calls with the same selector always return identical
//! profiles in identical order.

pub mod error;
pub mod registry;
pub mod sections;

pub use error::TemplateError;
pub use registry::{resolve, DocumentProfile, DocumentSelector};
pub use sections::{section_def, SectionDef};
