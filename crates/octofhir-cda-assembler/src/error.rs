//! Assembly errors

use octofhir_cda_diagnostics::{error_code, CdaError};
use octofhir_cda_model::{DocumentType, SectionTopic};
use thiserror::Error;

/// Errors raised while assembling sections
///
/// These are caller mistakes (asking for a topic the document type does not
/// carry), not clinical-content problems; content problems are deferred to
/// the composer's validation pass.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssemblyError {
    /// The resolved profile does not carry the requested topic
    #[error("{document_type} does not carry a {topic} section")]
    TopicNotInProfile {
        /// Requested topic
        topic: SectionTopic,
        /// The document type being assembled
        document_type: DocumentType,
    },
    /// The same topic was assembled twice for one document
    #[error("{topic} was assembled more than once")]
    DuplicateTopic {
        /// The repeated topic
        topic: SectionTopic,
    },
}

impl From<AssemblyError> for CdaError {
    fn from(err: AssemblyError) -> Self {
        match &err {
            AssemblyError::TopicNotInProfile { document_type, .. } => {
                CdaError::template_for(error_code::CDA0204, err.to_string(), document_type.name())
            }
            AssemblyError::DuplicateTopic { topic } => {
                CdaError::assembly_for(error_code::CDA0304, err.to_string(), topic.name())
            }
        }
    }
}
