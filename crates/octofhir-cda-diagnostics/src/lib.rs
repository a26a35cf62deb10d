//! CDA diagnostics and error handling
//!
//! This crate provides the error handling infrastructure for the CDA document
//! assembly engine, including error codes, document paths, and the collected
//! validation report produced by the composer.

pub mod error;
pub mod error_code;
pub mod issue;
pub mod path;

pub use error::*;
pub use error_code::*;
pub use issue::*;
pub use path::*;

/// Result type for CDA operations
pub type Result<T> = std::result::Result<T, CdaError>;
