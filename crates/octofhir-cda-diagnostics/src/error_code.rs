//! CDA error codes following a structured numbering system
//!
//! Error code ranges:
//! - CDA0001-CDA0099: Data element errors (coded values, times, quantities)
//! - CDA0100-CDA0199: Structure errors (statement tree, relationships)
//! - CDA0200-CDA0299: Template errors (document types, chains, section defs)
//! - CDA0300-CDA0399: Assembly errors (sections, narrative, entitlements)
//! - CDA0400-CDA0499: System errors (internal, configuration)

use serde::{Deserialize, Serialize};
use std::fmt;

/// Error code identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ErrorCode(u16);

impl ErrorCode {
    /// Create a new error code
    pub const fn new(code: u16) -> Self {
        Self(code)
    }

    /// Get the numeric code
    pub const fn code(&self) -> u16 {
        self.0
    }

    /// Get error information for this code
    pub fn info(&self) -> &'static ErrorInfo {
        ERROR_INFO.get(&self.0).unwrap_or(&UNKNOWN_ERROR)
    }

    /// Check if this is a data element error (0001-0099)
    pub const fn is_data_element_error(&self) -> bool {
        self.0 >= 1 && self.0 < 100
    }

    /// Check if this is a structure error (0100-0199)
    pub const fn is_structure_error(&self) -> bool {
        self.0 >= 100 && self.0 < 200
    }

    /// Check if this is a template error (0200-0299)
    pub const fn is_template_error(&self) -> bool {
        self.0 >= 200 && self.0 < 300
    }

    /// Check if this is an assembly error (0300-0399)
    pub const fn is_assembly_error(&self) -> bool {
        self.0 >= 300 && self.0 < 400
    }

    /// Check if this is a system error (0400-0499)
    pub const fn is_system_error(&self) -> bool {
        self.0 >= 400 && self.0 < 500
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CDA{:04}", self.0)
    }
}

/// Information about an error code
#[derive(Debug, Clone)]
pub struct ErrorInfo {
    /// Short description of the error
    pub description: &'static str,
    /// Detailed help text
    pub help: Option<&'static str>,
    /// Link to documentation
    pub docs_url: Option<&'static str>,
}

impl ErrorInfo {
    const fn new(description: &'static str) -> Self {
        Self {
            description,
            help: None,
            docs_url: None,
        }
    }

    const fn with_help(mut self, help: &'static str) -> Self {
        self.help = Some(help);
        self
    }
}

// Static error info storage
static UNKNOWN_ERROR: ErrorInfo = ErrorInfo::new("Unknown error");

use std::collections::HashMap;
use std::sync::LazyLock;

static ERROR_INFO: LazyLock<HashMap<u16, ErrorInfo>> = LazyLock::new(|| {
    let mut map = HashMap::new();

    // Data element errors (0001-0099)
    map.insert(1, ErrorInfo::new("Incomplete coded value")
        .with_help("A coded element needs a code, coding system, display name, original text, or an explicit null flavor"));
    map.insert(2, ErrorInfo::new("Invalid identifier root"));
    map.insert(3, ErrorInfo::new("Invalid timestamp"));
    map.insert(4, ErrorInfo::new("Invalid interval bounds"));
    map.insert(5, ErrorInfo::new("Unknown UCUM unit"));
    map.insert(6, ErrorInfo::new("Invalid quantity value"));
    map.insert(7, ErrorInfo::new("Invalid ratio"));
    map.insert(8, ErrorInfo::new("Invalid null flavor usage"));

    // Structure errors (0100-0199)
    map.insert(100, ErrorInfo::new("Missing mandatory statement code")
        .with_help("Observation, Act, Procedure and Encounter statements require a code"));
    map.insert(101, ErrorInfo::new("Invalid entry relationship"));
    map.insert(102, ErrorInfo::new("Invalid statement value"));
    map.insert(103, ErrorInfo::new("Missing statement identifier"));
    map.insert(104, ErrorInfo::new("Invalid participation"));

    // Template errors (0200-0299)
    map.insert(200, ErrorInfo::new("Unknown document type"));
    map.insert(201, ErrorInfo::new("Unknown document subtype"));
    map.insert(202, ErrorInfo::new("Template chain conflict")
        .with_help("The resolver produced an ambiguous or empty template chain for this document type and subtype"));
    map.insert(203, ErrorInfo::new("Unknown section topic"));
    map.insert(204, ErrorInfo::new("Topic not defined for document type"));

    // Assembly errors (0300-0399)
    map.insert(300, ErrorInfo::new("Missing mandatory topic")
        .with_help("This document type requires either entries or an explicit exclusion statement for the topic"));
    map.insert(301, ErrorInfo::new("Narrative rendering failed"));
    map.insert(302, ErrorInfo::new("Entitlement aggregation failed"));
    map.insert(303, ErrorInfo::new("Empty document"));
    map.insert(304, ErrorInfo::new("Duplicate section topic"));

    // System errors (0400-0499)
    map.insert(400, ErrorInfo::new("Internal error"));
    map.insert(401, ErrorInfo::new("Identifier generation failed"));
    map.insert(402, ErrorInfo::new("Terminology lookup failed"));

    map
});

// Convenient error code constants

// Data element errors
pub const CDA0001: ErrorCode = ErrorCode::new(1);
pub const CDA0002: ErrorCode = ErrorCode::new(2);
pub const CDA0003: ErrorCode = ErrorCode::new(3);
pub const CDA0004: ErrorCode = ErrorCode::new(4);
pub const CDA0005: ErrorCode = ErrorCode::new(5);
pub const CDA0006: ErrorCode = ErrorCode::new(6);
pub const CDA0007: ErrorCode = ErrorCode::new(7);
pub const CDA0008: ErrorCode = ErrorCode::new(8);

// Structure errors
pub const CDA0100: ErrorCode = ErrorCode::new(100);
pub const CDA0101: ErrorCode = ErrorCode::new(101);
pub const CDA0102: ErrorCode = ErrorCode::new(102);
pub const CDA0103: ErrorCode = ErrorCode::new(103);
pub const CDA0104: ErrorCode = ErrorCode::new(104);

// Template errors
pub const CDA0200: ErrorCode = ErrorCode::new(200);
pub const CDA0201: ErrorCode = ErrorCode::new(201);
pub const CDA0202: ErrorCode = ErrorCode::new(202);
pub const CDA0203: ErrorCode = ErrorCode::new(203);
pub const CDA0204: ErrorCode = ErrorCode::new(204);

// Assembly errors
pub const CDA0300: ErrorCode = ErrorCode::new(300);
pub const CDA0301: ErrorCode = ErrorCode::new(301);
pub const CDA0302: ErrorCode = ErrorCode::new(302);
pub const CDA0303: ErrorCode = ErrorCode::new(303);
pub const CDA0304: ErrorCode = ErrorCode::new(304);

// System errors
pub const CDA0400: ErrorCode = ErrorCode::new(400);
pub const CDA0401: ErrorCode = ErrorCode::new(401);
pub const CDA0402: ErrorCode = ErrorCode::new(402);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(CDA0001.to_string(), "CDA0001");
        assert_eq!(CDA0300.to_string(), "CDA0300");
    }

    #[test]
    fn test_error_categories() {
        assert!(CDA0001.is_data_element_error());
        assert!(!CDA0001.is_structure_error());

        assert!(CDA0100.is_structure_error());
        assert!(CDA0200.is_template_error());
        assert!(CDA0300.is_assembly_error());
        assert!(CDA0400.is_system_error());
    }

    #[test]
    fn test_error_info() {
        let info = CDA0001.info();
        assert_eq!(info.description, "Incomplete coded value");
        assert!(info.help.is_some());
    }
}
