//! Coverage - entitlements a participant holds, grouped per role

use crate::{ParticipationType, RoleClass};
use octofhir_cda_types::{CodedConcept, InstanceIdentifier, TemporalValue};
use serde::{Deserialize, Serialize};

/// The role under which coverage applies: role class plus participation type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverageRole {
    /// Role the participant plays
    pub role_class: RoleClass,
    /// How the participant takes part
    pub participation_type: ParticipationType,
}

impl CoverageRole {
    /// Create a coverage role
    pub const fn new(role_class: RoleClass, participation_type: ParticipationType) -> Self {
        Self {
            role_class,
            participation_type,
        }
    }

    /// The usual patient entitlement role
    pub const fn patient_holder() -> Self {
        Self::new(RoleClass::Patient, ParticipationType::Holder)
    }
}

/// A single entitlement record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entitlement {
    /// What kind of entitlement this is
    pub code: CodedConcept,
    /// Identifier of the entitlement instance, e.g. a card number
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<InstanceIdentifier>,
    /// When the entitlement is valid
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validity: Option<TemporalValue>,
}

impl Entitlement {
    /// Create an entitlement
    pub fn new(code: CodedConcept) -> Self {
        Self {
            code,
            id: None,
            validity: None,
        }
    }

    /// Set the entitlement instance identifier
    pub fn with_id(mut self, id: InstanceIdentifier) -> Self {
        self.id = Some(id);
        self
    }

    /// Set the validity period
    pub fn valid_during(mut self, validity: TemporalValue) -> Self {
        self.validity = Some(validity);
        self
    }
}

/// All entitlements one participant holds under one role
///
/// Produced by the entitlement aggregator; attached to exactly one section
/// or to the envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coverage {
    /// Role scoping the coverage
    pub role: CoverageRole,
    /// The participant holding the entitlements
    pub participant_id: InstanceIdentifier,
    /// Entitlements, first-appearance order preserved
    pub entitlements: Vec<Entitlement>,
}
