//! Per-topic section definitions
//!
//! Each clinical topic carries a fixed section code, default title and
//! conformance template root. These are data, not code branches: the
//! assembler reads them from the resolved profile and never hard-codes a
//! topic's wire identity.

use octofhir_cda_model::SectionTopic;
use octofhir_cda_types::{CodedConcept, TemplateId};
use serde::{Deserialize, Serialize};
use smallvec::{smallvec, SmallVec};

/// LOINC code system OID
pub const LOINC: &str = "2.16.840.1.113883.6.1";
/// National clinical terminology code system OID
pub const NCTIS: &str = "1.2.36.1.2001.1001.101";

/// One topic's wire identity inside a document profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionDef {
    /// The topic this definition covers
    pub topic: SectionTopic,
    /// Section code
    pub code: CodedConcept,
    /// Default section title
    pub title: String,
    /// Conformance template identifiers, order-significant
    pub template_ids: SmallVec<[TemplateId; 4]>,
}

fn tid(root: &str, extension: &str) -> TemplateId {
    TemplateId {
        root: root.to_string(),
        extension: Some(extension.to_string()),
    }
}

/// The section definition for a topic
pub fn section_def(topic: SectionTopic) -> SectionDef {
    let (code, system, display, title, template_root) = match topic {
        SectionTopic::Medications => (
            "10160-0",
            LOINC,
            "History of Medication use",
            "Medications",
            "1.2.36.1.2001.1001.102.101.16146",
        ),
        SectionTopic::AdverseReactions => (
            "48765-2",
            LOINC,
            "Allergies and adverse reactions",
            "Adverse Reactions",
            "1.2.36.1.2001.1001.102.101.16302",
        ),
        SectionTopic::MedicalHistory => (
            "11348-0",
            LOINC,
            "History of Past illness",
            "Medical History",
            "1.2.36.1.2001.1001.102.101.16117",
        ),
        SectionTopic::Immunisations => (
            "11369-6",
            LOINC,
            "History of Immunization",
            "Immunisations",
            "1.2.36.1.2001.1001.102.101.16638",
        ),
        SectionTopic::PathologyResults => (
            "30954-2",
            LOINC,
            "Relevant diagnostic tests/laboratory data",
            "Pathology Test Results",
            "1.2.36.1.2001.1001.102.101.16144",
        ),
        SectionTopic::ImagingResults => (
            "18726-0",
            LOINC,
            "Radiology studies",
            "Diagnostic Imaging Results",
            "1.2.36.1.2001.1001.102.101.16145",
        ),
        SectionTopic::Encounters => (
            "46240-8",
            LOINC,
            "History of encounters",
            "Encounters",
            "1.2.36.1.2001.1001.102.101.16231",
        ),
        SectionTopic::RelatedDocuments => (
            "102.16971",
            NCTIS,
            "Related Document",
            "Related Documents",
            "1.2.36.1.2001.1001.102.101.16971",
        ),
        SectionTopic::EventDetails => (
            "102.16672",
            NCTIS,
            "Event Overview",
            "Event Details",
            "1.2.36.1.2001.1001.102.101.16672",
        ),
    };
    SectionDef {
        topic,
        code: CodedConcept::coded(code, system, display),
        title: title.to_string(),
        template_ids: smallvec![tid(template_root, "1.0")],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(SectionTopic::Medications)]
    #[case(SectionTopic::AdverseReactions)]
    #[case(SectionTopic::MedicalHistory)]
    #[case(SectionTopic::Immunisations)]
    #[case(SectionTopic::PathologyResults)]
    #[case(SectionTopic::ImagingResults)]
    #[case(SectionTopic::Encounters)]
    #[case(SectionTopic::RelatedDocuments)]
    #[case(SectionTopic::EventDetails)]
    fn test_every_topic_has_a_complete_definition(#[case] topic: SectionTopic) {
        let def = section_def(topic);
        assert_eq!(def.topic, topic);
        assert!(def.code.code.is_some());
        assert!(def.code.code_system.is_some());
        assert!(!def.title.is_empty());
        assert!(!def.template_ids.is_empty());
    }

    #[test]
    fn test_section_codes_are_distinct() {
        let topics = [
            SectionTopic::Medications,
            SectionTopic::AdverseReactions,
            SectionTopic::MedicalHistory,
            SectionTopic::Immunisations,
            SectionTopic::PathologyResults,
            SectionTopic::ImagingResults,
            SectionTopic::Encounters,
            SectionTopic::RelatedDocuments,
            SectionTopic::EventDetails,
        ];
        let mut codes: Vec<_> = topics
            .iter()
            .map(|t| section_def(*t).code.code.unwrap())
            .collect();
        codes.sort();
        codes.dedup();
        assert_eq!(codes.len(), topics.len());
    }
}
