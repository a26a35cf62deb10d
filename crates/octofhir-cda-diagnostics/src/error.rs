//! CDA error types

use crate::{ErrorCode, ValidationFailure};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main CDA error type
#[derive(Debug, Clone, Error, Serialize, Deserialize)]
pub enum CdaError {
    /// Data element error (coded values, times, quantities)
    #[error("{code}: {message}")]
    DataElement {
        code: ErrorCode,
        message: String,
        context: Option<String>,
    },

    /// Structure error (statement tree, relationships)
    #[error("{code}: {message}")]
    Structure {
        code: ErrorCode,
        message: String,
        context: Option<String>,
    },

    /// Template error (document types, chains, section definitions)
    #[error("{code}: {message}")]
    Template {
        code: ErrorCode,
        message: String,
        document_type: Option<String>,
        context: Option<String>,
    },

    /// Assembly error (sections, narrative, entitlements)
    #[error("{code}: {message}")]
    Assembly {
        code: ErrorCode,
        message: String,
        topic: Option<String>,
        context: Option<String>,
    },

    /// System error
    #[error("{code}: {message}")]
    System {
        code: ErrorCode,
        message: String,
        context: Option<String>,
    },

    /// The composer's validation pass found problems
    #[error("document validation failed with {} issue(s)", .0.len())]
    Validation(ValidationFailure),

    /// Multiple errors collected
    #[error("Multiple errors: {}", .0.len())]
    Multiple(Vec<CdaError>),
}

impl CdaError {
    /// Create a data element error
    pub fn data_element(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::DataElement {
            code,
            message: message.into(),
            context: None,
        }
    }

    /// Create a structure error
    pub fn structure(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::Structure {
            code,
            message: message.into(),
            context: None,
        }
    }

    /// Create a template error
    pub fn template(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::Template {
            code,
            message: message.into(),
            document_type: None,
            context: None,
        }
    }

    /// Create a template error scoped to a document type
    pub fn template_for(
        code: ErrorCode,
        message: impl Into<String>,
        document_type: impl Into<String>,
    ) -> Self {
        Self::Template {
            code,
            message: message.into(),
            document_type: Some(document_type.into()),
            context: None,
        }
    }

    /// Create an assembly error
    pub fn assembly(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::Assembly {
            code,
            message: message.into(),
            topic: None,
            context: None,
        }
    }

    /// Create an assembly error scoped to a topic
    pub fn assembly_for(
        code: ErrorCode,
        message: impl Into<String>,
        topic: impl Into<String>,
    ) -> Self {
        Self::Assembly {
            code,
            message: message.into(),
            topic: Some(topic.into()),
            context: None,
        }
    }

    /// Create a system error
    pub fn system(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::System {
            code,
            message: message.into(),
            context: None,
        }
    }

    /// Attach context to the error
    pub fn with_context(mut self, ctx: impl Into<String>) -> Self {
        match &mut self {
            Self::DataElement { context, .. }
            | Self::Structure { context, .. }
            | Self::Template { context, .. }
            | Self::Assembly { context, .. }
            | Self::System { context, .. } => *context = Some(ctx.into()),
            Self::Validation(_) | Self::Multiple(_) => {}
        }
        self
    }

    /// Get the error code
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::DataElement { code, .. } => *code,
            Self::Structure { code, .. } => *code,
            Self::Template { code, .. } => *code,
            Self::Assembly { code, .. } => *code,
            Self::System { code, .. } => *code,
            Self::Validation(failure) => failure
                .issues
                .first()
                .map(|i| i.code)
                .unwrap_or(ErrorCode::new(0)),
            Self::Multiple(errors) => errors.first().map(|e| e.code()).unwrap_or(ErrorCode::new(0)),
        }
    }

    /// Get the validation failure, if this is a validation error
    pub fn as_validation(&self) -> Option<&ValidationFailure> {
        match self {
            Self::Validation(failure) => Some(failure),
            _ => None,
        }
    }
}

impl From<ValidationFailure> for CdaError {
    fn from(failure: ValidationFailure) -> Self {
        Self::Validation(failure)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CDA0005, CDA0202, DocumentPath, IssueDetail, ValidationIssue};

    #[test]
    fn test_error_constructors() {
        let err = CdaError::data_element(CDA0005, "unknown unit 'bananas'")
            .with_context("medication dose quantity");

        assert_eq!(err.code(), CDA0005);
        assert!(err.to_string().contains("CDA0005"));
    }

    #[test]
    fn test_validation_error_code_comes_from_first_issue() {
        let failure = ValidationFailure::new(vec![ValidationIssue::error(
            CDA0202,
            IssueDetail::TemplateChainConflict {
                document_type: "eventSummary".to_string(),
                subtype: None,
            },
            DocumentPath::root(),
        )]);

        let err = CdaError::from(failure);
        assert_eq!(err.code(), CDA0202);
        assert!(err.as_validation().is_some());
    }
}
