//! Null flavors - standardized reasons for absent values
//!
//! A coded element is never silently empty: when no real value can be given,
//! an explicit null flavor states why. Codes follow the HL7 v3 NullFlavor
//! vocabulary.

use serde::{Deserialize, Serialize};
use std::fmt;

/// HL7 v3 null flavor vocabulary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NullFlavor {
    /// No information whatsoever can be inferred
    NoInformation,
    /// No proper value is applicable in this context
    NotApplicable,
    /// A proper value is applicable but not known
    Unknown,
    /// The source was asked but does not know the value
    AskedButUnknown,
    /// The source has not been asked
    NotAsked,
    /// The value is present but masked for privacy
    Masked,
    /// An actual value exists but cannot be expressed in the coding system
    Other,
    /// Negative infinity of numbers
    NegativeInfinity,
    /// Positive infinity of numbers
    PositiveInfinity,
}

impl NullFlavor {
    /// Get the wire code
    pub const fn code(&self) -> &'static str {
        match self {
            Self::NoInformation => "NI",
            Self::NotApplicable => "NA",
            Self::Unknown => "UNK",
            Self::AskedButUnknown => "ASKU",
            Self::NotAsked => "NASK",
            Self::Masked => "MSK",
            Self::Other => "OTH",
            Self::NegativeInfinity => "NINF",
            Self::PositiveInfinity => "PINF",
        }
    }

    /// Get the human-readable name
    pub const fn name(&self) -> &'static str {
        match self {
            Self::NoInformation => "NoInformation",
            Self::NotApplicable => "NotApplicable",
            Self::Unknown => "Unknown",
            Self::AskedButUnknown => "AskedButUnknown",
            Self::NotAsked => "NotAsked",
            Self::Masked => "Masked",
            Self::Other => "Other",
            Self::NegativeInfinity => "NegativeInfinity",
            Self::PositiveInfinity => "PositiveInfinity",
        }
    }

    /// Look up a null flavor from its wire code
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "NI" => Some(Self::NoInformation),
            "NA" => Some(Self::NotApplicable),
            "UNK" => Some(Self::Unknown),
            "ASKU" => Some(Self::AskedButUnknown),
            "NASK" => Some(Self::NotAsked),
            "MSK" => Some(Self::Masked),
            "OTH" => Some(Self::Other),
            "NINF" => Some(Self::NegativeInfinity),
            "PINF" => Some(Self::PositiveInfinity),
            _ => None,
        }
    }

    /// Check if this flavor is one of the "unknown" family (UNK, ASKU, NASK)
    pub const fn is_unknown_family(&self) -> bool {
        matches!(self, Self::Unknown | Self::AskedButUnknown | Self::NotAsked)
    }
}

impl fmt::Display for NullFlavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_round_trip() {
        for flavor in [
            NullFlavor::NoInformation,
            NullFlavor::NotApplicable,
            NullFlavor::Unknown,
            NullFlavor::AskedButUnknown,
            NullFlavor::NotAsked,
            NullFlavor::Masked,
            NullFlavor::Other,
            NullFlavor::NegativeInfinity,
            NullFlavor::PositiveInfinity,
        ] {
            assert_eq!(NullFlavor::from_code(flavor.code()), Some(flavor));
        }
    }

    #[test]
    fn test_unknown_family() {
        assert!(NullFlavor::Unknown.is_unknown_family());
        assert!(NullFlavor::NotAsked.is_unknown_family());
        assert!(!NullFlavor::NotApplicable.is_unknown_family());
    }
}
