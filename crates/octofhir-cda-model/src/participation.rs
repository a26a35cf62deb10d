//! Participations - authors, performers and other participating entities

use octofhir_cda_types::{CodedConcept, InstanceIdentifier, Timestamp};
use serde::{Deserialize, Serialize};

/// HL7 v3 participation type codes used by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParticipationType {
    /// Benefit or coverage holder
    Holder,
    /// Beneficiary of a coverage
    Beneficiary,
    /// Referred-to provider
    ReferredTo,
    /// Information recipient
    InformationRecipient,
    /// Location of the act
    Location,
}

impl ParticipationType {
    /// Get the wire code
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Holder => "HLD",
            Self::Beneficiary => "BEN",
            Self::ReferredTo => "REFT",
            Self::InformationRecipient => "PRCP",
            Self::Location => "LOC",
        }
    }
}

/// HL7 v3 role class codes used by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoleClass {
    /// The patient
    Patient,
    /// An assigned healthcare entity
    Assigned,
    /// A coverage/policy holder role
    PolicyHolder,
    /// A service delivery location
    ServiceDeliveryLocation,
}

impl RoleClass {
    /// Get the wire code
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Patient => "PAT",
            Self::Assigned => "ASSIGNED",
            Self::PolicyHolder => "POLHOLD",
            Self::ServiceDeliveryLocation => "SDLOC",
        }
    }
}

/// An authoring participation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    /// When the authoring happened
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<Timestamp>,
    /// Identifier of the assigned author
    pub id: InstanceIdentifier,
    /// Displayable name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Author role or specialty
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<CodedConcept>,
}

impl Author {
    /// Create an author participation
    pub fn new(id: InstanceIdentifier) -> Self {
        Self {
            time: None,
            id,
            name: None,
            role: None,
        }
    }

    /// Set the authoring time
    pub fn at(mut self, time: Timestamp) -> Self {
        self.time = Some(time);
        self
    }

    /// Set the displayable name
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the role
    pub fn with_role(mut self, role: CodedConcept) -> Self {
        self.role = Some(role);
        self
    }
}

/// A performing participation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Performer {
    /// Identifier of the performer
    pub id: InstanceIdentifier,
    /// Displayable name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Function performed, e.g. primary surgeon
    #[serde(skip_serializing_if = "Option::is_none")]
    pub function: Option<CodedConcept>,
}

impl Performer {
    /// Create a performer participation
    pub fn new(id: InstanceIdentifier) -> Self {
        Self {
            id,
            name: None,
            function: None,
        }
    }

    /// Set the displayable name
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// A generic participation with explicit type and role
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    /// How the entity participates
    pub type_code: ParticipationType,
    /// What role the entity plays
    pub role_class: RoleClass,
    /// Identifier of the participant
    pub id: InstanceIdentifier,
    /// Displayable name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Participant {
    /// Create a participation
    pub fn new(
        type_code: ParticipationType,
        role_class: RoleClass,
        id: InstanceIdentifier,
    ) -> Self {
        Self {
            type_code,
            role_class,
            id,
            name: None,
        }
    }

    /// Set the displayable name
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}
