//! Resolver errors

use octofhir_cda_diagnostics::{error_code, CdaError};
use octofhir_cda_model::{DocumentSubtype, DocumentType};
use thiserror::Error;

/// Errors raised while resolving a document profile
///
/// An unknown combination is not fatal on its own: the composer converts it
/// into a template-chain-conflict validation issue so callers see it
/// alongside every other problem in the document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    /// No profile table entry exists for the selector
    #[error("no document profile for {document_type} (subtype {subtype:?})")]
    UnknownCombination {
        /// Requested document type
        document_type: DocumentType,
        /// Requested subtype, if any
        subtype: Option<DocumentSubtype>,
    },
    /// The selector requires a subtype but none was given
    #[error("{document_type} requires a subtype")]
    SubtypeRequired {
        /// Requested document type
        document_type: DocumentType,
    },
}

impl From<TemplateError> for CdaError {
    fn from(err: TemplateError) -> Self {
        CdaError::template(error_code::CDA0202, err.to_string())
    }
}
