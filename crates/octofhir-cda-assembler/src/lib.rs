//! Document assembly pipeline
//!
//! Turns caller-supplied domain records into sections and composes them
//! into a validated document envelope:
//! - [`records`] - the typed inputs, one record family per clinical topic
//! - [`topics`] - per-topic entry builders producing statement trees
//! - [`SectionAssembler`] - the single generic section algorithm
//! - [`aggregate`] - entitlement grouping into coverage
//! - [`compose`] - envelope composition with the deferred validation pass

pub mod composer;
pub mod entitlements;
pub mod error;
pub mod exclusion;
pub mod providers;
pub mod records;
pub mod section;
pub mod topics;

pub use composer::{compose, Composition, DocumentMeta};
pub use entitlements::aggregate;
pub use error::AssemblyError;
pub use exclusion::ExclusionReason;
pub use providers::{
    AssemblyContext, IdentifierProvider, NarrativeRenderer, NullTerminology,
    OidIdentifierProvider, SilentRenderer, TerminologyProvider,
};
pub use records::{
    AdverseReaction, Analyte, EncounterRecord, EntitlementInput, EventDetail, HistoryKind,
    ImagingResult, Immunisation, MedicalHistoryItem, Medication, PathologyResult, RelatedDocument,
    TopicInput, TopicRecords,
};
pub use section::SectionAssembler;
