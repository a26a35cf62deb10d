//! Exclusion statements
//!
//! An exclusion statement positively asserts that no data exists for a
//! topic, as distinct from silently omitting the section. It is emitted as
//! a single observation carrying the global-statement code, only when the
//! topic supports one, zero entries were built, and the caller supplied a
//! reason.

use octofhir_cda_model::{ClinicalStatement, StatementBuilder};
use octofhir_cda_types::CodedConcept;
use serde::{Deserialize, Serialize};

/// Global statement code system OID
const GLOBAL_STATEMENT_SYSTEM: &str = "1.2.36.1.2001.1001.101.104.16299";

/// Why a topic has no entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ExclusionReason {
    /// The subject is known to have none
    NoneKnown,
    /// The source system supplied none
    NoneSupplied,
    /// The subject was not asked
    NotAsked,
}

impl ExclusionReason {
    /// Get the global-statement wire code
    pub const fn code(&self) -> &'static str {
        match self {
            Self::NoneKnown => "01",
            Self::NotAsked => "02",
            Self::NoneSupplied => "03",
        }
    }

    /// Get the display name
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::NoneKnown => "None known",
            Self::NotAsked => "Not asked",
            Self::NoneSupplied => "None supplied",
        }
    }

    /// The reason as a coded concept
    pub fn as_concept(&self) -> CodedConcept {
        CodedConcept::coded(self.code(), GLOBAL_STATEMENT_SYSTEM, self.display_name())
    }
}

/// Build the single exclusion-statement entry for a section
pub fn exclusion_statement(reason: ExclusionReason) -> ClinicalStatement {
    StatementBuilder::observation()
        .code(CodedConcept::coded(
            "103.16302.120.1.2",
            "1.2.36.1.2001.1001.101",
            "Global Statement",
        ))
        .value(reason.as_concept())
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use octofhir_cda_model::StatementKind;

    #[test]
    fn test_exclusion_statement_shape() {
        let statement = exclusion_statement(ExclusionReason::NoneKnown);
        assert_eq!(statement.kind, StatementKind::Observation);
        assert!(!statement.missing_mandatory_code);
        let value = statement.values[0].as_coded().unwrap();
        assert_eq!(value.code.as_deref(), Some("01"));
        assert_eq!(value.display_name.as_deref(), Some("None known"));
    }
}
