//! Adverse reaction entries

use crate::records::AdverseReaction;
use octofhir_cda_model::{ClinicalStatement, RelationshipType, StatementBuilder};
use octofhir_cda_types::TemporalValue;

/// One observation per reaction; manifestations hang off it as inverted
/// manifestation edges
pub fn build(records: &[AdverseReaction]) -> Vec<ClinicalStatement> {
    records.iter().map(build_one).collect()
}

fn build_one(record: &AdverseReaction) -> ClinicalStatement {
    let mut builder = StatementBuilder::observation().code(record.agent.clone());
    if let Some(reaction_type) = &record.reaction_type {
        builder = builder.value(reaction_type.clone());
    }
    if let Some(onset) = &record.onset {
        builder = builder.effective_time(TemporalValue::instant(*onset));
    }
    for manifestation in &record.manifestations {
        let child = StatementBuilder::observation()
            .code(manifestation.clone())
            .build();
        builder = builder.relationship(RelationshipType::Manifestation, true, child);
    }
    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use octofhir_cda_types::CodedConcept;

    const SNOMED: &str = "2.16.840.1.113883.6.96";

    #[test]
    fn test_manifestations_become_inverted_children() {
        let record = AdverseReaction {
            agent: CodedConcept::coded("372687004", SNOMED, "Amoxicillin"),
            manifestations: vec![
                CodedConcept::coded("271807003", SNOMED, "Skin rash"),
                CodedConcept::coded("267036007", SNOMED, "Dyspnoea"),
            ],
            reaction_type: Some(CodedConcept::coded("419076005", SNOMED, "Allergic reaction")),
            onset: None,
        };
        let entry = &build(&[record])[0];
        assert_eq!(entry.relationships.len(), 2);
        assert!(entry
            .relationships
            .iter()
            .all(|r| r.relationship_type == RelationshipType::Manifestation && r.inverted));
        assert_eq!(entry.values.len(), 1);
    }

    #[test]
    fn test_agent_without_manifestations_is_a_lone_observation() {
        let record = AdverseReaction::new(CodedConcept::text("penicillin"));
        let entry = &build(&[record])[0];
        assert!(entry.relationships.is_empty());
        assert!(entry.values.is_empty());
    }
}
