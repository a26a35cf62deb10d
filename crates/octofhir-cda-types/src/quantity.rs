//! Physical quantities and ratios
//!
//! Quantities carry a decimal value and a UCUM unit. Units are checked
//! against the UCUM grammar at build time; an unknown unit does not reject
//! the quantity (the value is clinician-entered data the writer can still
//! emit) but the quantity is flagged so the validation pass can warn.

use crate::NullFlavor;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A physical quantity: decimal value plus UCUM unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhysicalQuantity {
    /// Magnitude
    pub value: Decimal,
    /// UCUM unit expression; "1" for dimensionless
    pub unit: String,
    /// True when the unit parsed as valid UCUM
    pub unit_validated: bool,
    /// Reason no real value is given
    #[serde(skip_serializing_if = "Option::is_none")]
    pub null_flavor: Option<NullFlavor>,
}

impl PhysicalQuantity {
    /// Create a quantity, validating the unit against the UCUM grammar
    pub fn new(value: Decimal, unit: impl Into<String>) -> Self {
        let unit = unit.into();
        let unit = if unit.is_empty() { "1".to_string() } else { unit };
        let unit_validated = octofhir_ucum::get_canonical_units(&unit).is_ok();
        Self {
            value,
            unit,
            unit_validated,
            null_flavor: None,
        }
    }

    /// Create a dimensionless quantity
    pub fn dimensionless(value: Decimal) -> Self {
        Self::new(value, "1")
    }

    /// Create a quantity that is nothing but a null flavor
    pub fn null(flavor: NullFlavor) -> Self {
        Self {
            value: Decimal::ZERO,
            unit: "1".to_string(),
            unit_validated: true,
            null_flavor: Some(flavor),
        }
    }

    /// True when the quantity carries a null flavor instead of a value
    pub fn is_null_flavored(&self) -> bool {
        self.null_flavor.is_some()
    }
}

impl fmt::Display for PhysicalQuantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(flavor) = self.null_flavor {
            return write!(f, "[{}]", flavor.code());
        }
        if self.unit == "1" {
            write!(f, "{}", self.value)
        } else {
            write!(f, "{} {}", self.value, self.unit)
        }
    }
}

/// A ratio of two quantities
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ratio {
    /// Numerator
    pub numerator: PhysicalQuantity,
    /// Denominator
    pub denominator: PhysicalQuantity,
}

impl Ratio {
    /// Create a ratio
    pub fn new(numerator: PhysicalQuantity, denominator: PhysicalQuantity) -> Self {
        Self {
            numerator,
            denominator,
        }
    }
}

impl fmt::Display for Ratio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.numerator, self.denominator)
    }
}

/// A quantity interval, used for reference ranges
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuantityInterval {
    /// Lower bound (inclusive)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub low: Option<PhysicalQuantity>,
    /// Upper bound (inclusive)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub high: Option<PhysicalQuantity>,
    /// Reason no bounds are given
    #[serde(skip_serializing_if = "Option::is_none")]
    pub null_flavor: Option<NullFlavor>,
}

impl QuantityInterval {
    /// Create a bounded interval
    pub fn between(low: PhysicalQuantity, high: PhysicalQuantity) -> Self {
        Self {
            low: Some(low),
            high: Some(high),
            null_flavor: None,
        }
    }

    /// Create an interval with only a lower bound
    pub fn at_least(low: PhysicalQuantity) -> Self {
        Self {
            low: Some(low),
            high: None,
            null_flavor: None,
        }
    }

    /// Create an interval with only an upper bound
    pub fn at_most(high: PhysicalQuantity) -> Self {
        Self {
            low: None,
            high: Some(high),
            null_flavor: None,
        }
    }

    /// An interval with no bounds carries an explicit absence marker
    pub fn unspecified() -> Self {
        Self {
            low: None,
            high: None,
            null_flavor: Some(NullFlavor::NoInformation),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_valid_ucum_unit() {
        let q = PhysicalQuantity::new(Decimal::new(5, 0), "mg");
        assert!(q.unit_validated);
        assert_eq!(q.to_string(), "5 mg");
    }

    #[test]
    fn test_unknown_unit_kept_but_flagged() {
        let q = PhysicalQuantity::new(Decimal::new(2, 0), "tablets-of-unknownium");
        assert!(!q.unit_validated);
        assert_eq!(q.unit, "tablets-of-unknownium");
    }

    #[test]
    fn test_empty_unit_becomes_dimensionless() {
        let q = PhysicalQuantity::new(Decimal::ONE, "");
        assert_eq!(q.unit, "1");
        assert!(q.unit_validated);
        assert_eq!(q.to_string(), "1");
    }

    #[test]
    fn test_unspecified_quantity_interval_carries_marker() {
        let range = QuantityInterval::unspecified();
        assert_eq!(range.null_flavor, Some(NullFlavor::NoInformation));
    }
}
