//! Validation issues collected by the composer's deferred validation pass
//!
//! Nothing in the assembly pipeline fails eagerly on clinical content.
//! Builders flag problems on the values they return, and the composer walks
//! the finished tree once, collecting every issue into a single report so a
//! caller sees the complete list in one pass.

use crate::{DocumentPath, ErrorCode};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Diagnostic severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
    /// Error - the document must not be handed to the writer
    Error,
    /// Warning - potential issue but the document can be emitted
    Warning,
    /// Information - informational message
    Info,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Info => write!(f, "info"),
        }
    }
}

/// What exactly went wrong, per the validation taxonomy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum IssueDetail {
    /// A mandatory concept lacked code, system, display and text, and no
    /// null flavor was supplied
    IncompleteConcept,
    /// A statement kind that structurally requires a code was built without
    /// one
    MissingStatementCode {
        /// Statement kind name, e.g. "Observation"
        statement_kind: String,
    },
    /// A document type requires entries or an exclusion statement for this
    /// topic and got neither
    MissingMandatoryTopic {
        /// Topic name, e.g. "adverseReactions"
        topic: String,
    },
    /// The resolver produced an ambiguous or empty template chain
    TemplateChainConflict {
        /// Document type name
        document_type: String,
        /// Subtype name, if one was requested
        subtype: Option<String>,
    },
    /// A physical quantity carries a unit the UCUM tables do not know
    UnknownUnit {
        /// The unit text as supplied
        unit: String,
    },
}

/// A single validation finding with its location in the document tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    /// Severity level
    pub severity: Severity,
    /// Error code
    pub code: ErrorCode,
    /// Structured detail
    pub detail: IssueDetail,
    /// Path into the assembled tree
    pub path: DocumentPath,
}

impl ValidationIssue {
    /// Create an error-severity issue
    pub fn error(code: ErrorCode, detail: IssueDetail, path: DocumentPath) -> Self {
        Self {
            severity: Severity::Error,
            code,
            detail,
            path,
        }
    }

    /// Create a warning-severity issue
    pub fn warning(code: ErrorCode, detail: IssueDetail, path: DocumentPath) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            detail,
            path,
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} - {} at {}",
            self.severity,
            self.code,
            self.code.info().description,
            self.path
        )
    }
}

/// The collected result of the composer's validation pass
///
/// Always non-empty: an empty issue list means composition succeeded and no
/// failure value exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationFailure {
    /// Every issue found in one pass over the tree
    pub issues: Vec<ValidationIssue>,
}

impl ValidationFailure {
    /// Create a failure from collected issues
    pub fn new(issues: Vec<ValidationIssue>) -> Self {
        debug_assert!(!issues.is_empty());
        Self { issues }
    }

    /// Number of collected issues
    pub fn len(&self) -> usize {
        self.issues.len()
    }

    /// True when no issues are present (never the case for a returned failure)
    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    /// Iterate over issues of a given severity
    pub fn with_severity(&self, severity: Severity) -> impl Iterator<Item = &ValidationIssue> {
        self.issues.iter().filter(move |i| i.severity == severity)
    }

    /// True when at least one error-severity issue exists
    pub fn has_errors(&self) -> bool {
        self.issues.iter().any(|i| i.severity == Severity::Error)
    }
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} validation issue(s):", self.issues.len())?;
        for issue in &self.issues {
            writeln!(f, "  {issue}")?;
        }
        Ok(())
    }
}

#[cfg(feature = "colored")]
impl ValidationFailure {
    /// Render the report with terminal colours
    pub fn to_colored_string(&self) -> String {
        use colored::Colorize;

        let mut out = format!("{} validation issue(s):\n", self.issues.len());
        for issue in &self.issues {
            let severity = match issue.severity {
                Severity::Error => "error".red().bold().to_string(),
                Severity::Warning => "warning".yellow().bold().to_string(),
                Severity::Info => "info".cyan().to_string(),
            };
            out.push_str(&format!(
                "  {severity}: {} - {} at {}\n",
                issue.code,
                issue.code.info().description,
                issue.path
            ));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CDA0001, CDA0300};

    #[test]
    fn test_issue_display() {
        let issue = ValidationIssue::error(
            CDA0001,
            IssueDetail::IncompleteConcept,
            DocumentPath::root().child("section[medications]").child("code"),
        );
        let text = issue.to_string();
        assert!(text.contains("CDA0001"));
        assert!(text.contains("/section[medications]/code"));
    }

    #[test]
    fn test_detail_serializes_with_kind_tag() {
        let detail = IssueDetail::MissingStatementCode {
            statement_kind: "Observation".to_string(),
        };
        let json = serde_json::to_value(&detail).unwrap();
        assert_eq!(json["kind"], "missingStatementCode");
        assert_eq!(json["statementKind"], "Observation");

        let back: IssueDetail = serde_json::from_value(json).unwrap();
        assert_eq!(back, detail);
    }

    #[test]
    fn test_failure_severity_filter() {
        let failure = ValidationFailure::new(vec![
            ValidationIssue::error(
                CDA0300,
                IssueDetail::MissingMandatoryTopic {
                    topic: "medications".to_string(),
                },
                DocumentPath::root(),
            ),
            ValidationIssue::warning(
                CDA0001,
                IssueDetail::IncompleteConcept,
                DocumentPath::root(),
            ),
        ]);

        assert_eq!(failure.len(), 2);
        assert!(failure.has_errors());
        assert_eq!(failure.with_severity(Severity::Error).count(), 1);
    }
}
