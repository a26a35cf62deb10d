//! Instance and template identifiers
//!
//! CDA identifiers are (root, extension) pairs: the root is an OID or UUID
//! naming an assigning space, the extension a value unique within it.
//! Template identifiers declare which structural profile a document, section
//! or entry conforms to; their order within a chain is significant and
//! consuming systems validate against the exact sequence.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use thiserror::Error;

/// Identifier construction errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentifierError {
    /// The root is not a plausible OID or UUID
    #[error("invalid identifier root: '{0}'")]
    InvalidRoot(String),
    /// The canonical string form could not be parsed
    #[error("malformed identifier literal: '{0}'")]
    Malformed(String),
}

impl From<IdentifierError> for octofhir_cda_diagnostics::CdaError {
    fn from(err: IdentifierError) -> Self {
        octofhir_cda_diagnostics::CdaError::data_element(
            octofhir_cda_diagnostics::CDA0002,
            err.to_string(),
        )
    }
}

fn is_oid(root: &str) -> bool {
    !root.is_empty()
        && root.split('.').all(|arc| {
            !arc.is_empty()
                && arc.chars().all(|c| c.is_ascii_digit())
                && (arc.len() == 1 || !arc.starts_with('0'))
        })
        && root.contains('.')
}

fn is_uuid(root: &str) -> bool {
    let bytes = root.as_bytes();
    if bytes.len() != 36 {
        return false;
    }
    root.char_indices().all(|(i, c)| match i {
        8 | 13 | 18 | 23 => c == '-',
        _ => c.is_ascii_hexdigit(),
    })
}

/// An instance identifier (HL7 II): root plus optional extension
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstanceIdentifier {
    /// OID or UUID naming the assigning space
    pub root: String,
    /// Value unique within the root's space
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<String>,
    /// Human-readable name of the assigning authority
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigning_authority_name: Option<String>,
}

impl InstanceIdentifier {
    /// Create an identifier with a validated root
    pub fn new(root: impl Into<String>) -> Result<Self, IdentifierError> {
        let root = root.into();
        if !is_oid(&root) && !is_uuid(&root) {
            return Err(IdentifierError::InvalidRoot(root));
        }
        Ok(Self {
            root,
            extension: None,
            assigning_authority_name: None,
        })
    }

    /// Create an identifier with a root and extension
    pub fn with_extension(
        root: impl Into<String>,
        extension: impl Into<String>,
    ) -> Result<Self, IdentifierError> {
        let mut id = Self::new(root)?;
        id.extension = Some(extension.into());
        Ok(id)
    }

    /// Set the assigning authority name
    pub fn with_authority(mut self, name: impl Into<String>) -> Self {
        self.assigning_authority_name = Some(name.into());
        self
    }

    /// Check if the root is an OID
    pub fn is_oid_root(&self) -> bool {
        is_oid(&self.root)
    }

    /// Check if the root is a UUID
    pub fn is_uuid_root(&self) -> bool {
        is_uuid(&self.root)
    }
}

impl fmt::Display for InstanceIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.extension {
            Some(ext) => write!(f, "{}^{}", self.root, ext),
            None => write!(f, "{}", self.root),
        }
    }
}

/// A template identifier declaring conformance to a structural profile
///
/// Serialized as a single canonical string, `root` or `root^extension`,
/// because template chains are compared literally by consuming systems.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TemplateId {
    /// Template OID
    pub root: String,
    /// Template version marker
    pub extension: Option<String>,
}

impl TemplateId {
    /// Create a template id with a validated OID root
    pub fn new(root: impl Into<String>) -> Result<Self, IdentifierError> {
        let root = root.into();
        if !is_oid(&root) {
            return Err(IdentifierError::InvalidRoot(root));
        }
        Ok(Self {
            root,
            extension: None,
        })
    }

    /// Create a versioned template id
    pub fn versioned(
        root: impl Into<String>,
        extension: impl Into<String>,
    ) -> Result<Self, IdentifierError> {
        let mut id = Self::new(root)?;
        id.extension = Some(extension.into());
        Ok(id)
    }

    /// Parse from the canonical `root` or `root^extension` form
    pub fn parse(raw: &str) -> Result<Self, IdentifierError> {
        match raw.split_once('^') {
            Some((root, ext)) => {
                if ext.is_empty() {
                    return Err(IdentifierError::Malformed(raw.to_string()));
                }
                Self::versioned(root, ext)
            }
            None => Self::new(raw),
        }
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.extension {
            Some(ext) => write!(f, "{}^{}", self.root, ext),
            None => write!(f, "{}", self.root),
        }
    }
}

impl Serialize for TemplateId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for TemplateId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_oid_root_accepted() {
        let id = InstanceIdentifier::with_extension("1.2.36.1.2001.1001.101", "8003614567890123")
            .unwrap();
        assert!(id.is_oid_root());
        assert_eq!(
            id.to_string(),
            "1.2.36.1.2001.1001.101^8003614567890123"
        );
    }

    #[test]
    fn test_uuid_root_accepted() {
        let id = InstanceIdentifier::new("c3a6e405-3f8a-4f38-b7a5-9d5f6a1e2b3c").unwrap();
        assert!(id.is_uuid_root());
        assert!(!id.is_oid_root());
    }

    #[test]
    fn test_bad_roots_rejected() {
        assert!(InstanceIdentifier::new("not-an-oid").is_err());
        assert!(InstanceIdentifier::new("1..2.3").is_err());
        assert!(InstanceIdentifier::new("1.02.3").is_err());
        assert!(InstanceIdentifier::new("").is_err());
    }

    #[test]
    fn test_template_id_parse_round_trip() {
        let id = TemplateId::parse("1.2.36.1.2001.1001.100.1002.120^1.4").unwrap();
        assert_eq!(id.root, "1.2.36.1.2001.1001.100.1002.120");
        assert_eq!(id.extension.as_deref(), Some("1.4"));
        assert_eq!(id.to_string(), "1.2.36.1.2001.1001.100.1002.120^1.4");
    }

    #[test]
    fn test_template_id_rejects_empty_extension() {
        assert!(TemplateId::parse("1.2.36^").is_err());
    }
}
