//! Entitlement aggregation
//!
//! Groups entitlement inputs into coverage, one group per (owner, role)
//! pair. Pure function: same inputs, same groups, same order.

use crate::records::EntitlementInput;
use indexmap::IndexMap;
use octofhir_cda_model::{Coverage, CoverageRole, Entitlement};
use octofhir_cda_types::InstanceIdentifier;

/// Group entitlements by (owner, role), preserving first-appearance order
pub fn aggregate(inputs: &[EntitlementInput]) -> Vec<Coverage> {
    let mut groups: IndexMap<(InstanceIdentifier, CoverageRole), Vec<Entitlement>> =
        IndexMap::new();
    for input in inputs {
        let mut entitlement = Entitlement::new(input.code.clone());
        if let Some(id) = &input.id {
            entitlement = entitlement.with_id(id.clone());
        }
        if let Some(validity) = &input.validity {
            entitlement = entitlement.valid_during(validity.clone());
        }
        groups
            .entry((input.owner.clone(), input.role))
            .or_default()
            .push(entitlement);
    }
    groups
        .into_iter()
        .map(|((participant_id, role), entitlements)| Coverage {
            role,
            participant_id,
            entitlements,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use octofhir_cda_model::{ParticipationType, RoleClass};
    use octofhir_cda_types::CodedConcept;
    use pretty_assertions::assert_eq;

    fn ihi(extension: &str) -> InstanceIdentifier {
        InstanceIdentifier::with_extension("1.2.36.1.2001.1003.0", extension).unwrap()
    }

    fn medicare() -> CodedConcept {
        CodedConcept::coded("1", "1.2.36.1.2001.1001.101.104.16047", "Medicare Benefits")
    }

    fn concession() -> CodedConcept {
        CodedConcept::coded("5", "1.2.36.1.2001.1001.101.104.16047", "Health Care Concession")
    }

    #[test]
    fn test_same_owner_and_role_collapse_into_one_coverage() {
        let owner = ihi("8003608166690503");
        let role = CoverageRole::patient_holder();
        let coverages = aggregate(&[
            EntitlementInput::new(owner.clone(), role, medicare()),
            EntitlementInput::new(owner.clone(), role, concession()),
        ]);
        assert_eq!(coverages.len(), 1);
        assert_eq!(coverages[0].entitlements.len(), 2);
        assert_eq!(coverages[0].participant_id, owner);
    }

    #[test]
    fn test_distinct_roles_stay_separate() {
        let owner = ihi("8003608166690503");
        let holder = CoverageRole::patient_holder();
        let beneficiary =
            CoverageRole::new(RoleClass::PolicyHolder, ParticipationType::Beneficiary);
        let coverages = aggregate(&[
            EntitlementInput::new(owner.clone(), holder, medicare()),
            EntitlementInput::new(owner, beneficiary, concession()),
        ]);
        assert_eq!(coverages.len(), 2);
    }

    #[test]
    fn test_first_appearance_order_is_preserved() {
        let first = ihi("8003608166690503");
        let second = ihi("8003608500302884");
        let role = CoverageRole::patient_holder();
        let coverages = aggregate(&[
            EntitlementInput::new(first.clone(), role, medicare()),
            EntitlementInput::new(second.clone(), role, medicare()),
            EntitlementInput::new(first.clone(), role, concession()),
        ]);
        assert_eq!(coverages.len(), 2);
        assert_eq!(coverages[0].participant_id, first);
        assert_eq!(coverages[1].participant_id, second);
        assert_eq!(coverages[0].entitlements.len(), 2);
    }

    #[test]
    fn test_no_inputs_no_coverage() {
        assert!(aggregate(&[]).is_empty());
    }
}
