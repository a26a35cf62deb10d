//! Diagnostic imaging entries

use crate::records::ImagingResult;
use octofhir_cda_model::{ClinicalStatement, EntryValue, StatementBuilder};
use octofhir_cda_types::TemporalValue;

/// One observation per examination
pub fn build(records: &[ImagingResult]) -> Vec<ClinicalStatement> {
    records.iter().map(build_one).collect()
}

fn build_one(record: &ImagingResult) -> ClinicalStatement {
    let mut builder = StatementBuilder::observation().code(record.examination.clone());
    if let Some(modality) = &record.modality {
        builder = builder.value(modality.clone());
    }
    if let Some(site) = &record.anatomical_site {
        builder = builder.value(site.clone());
    }
    if let Some(performed) = &record.performed {
        builder = builder.effective_time(TemporalValue::instant(*performed));
    }
    if let Some(findings) = &record.findings {
        builder = builder.value(EntryValue::Text(findings.clone()));
    }
    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use octofhir_cda_types::{CodedConcept, Timestamp};

    const SNOMED: &str = "2.16.840.1.113883.6.96";

    #[test]
    fn test_findings_are_carried_as_text_value() {
        let mut record =
            ImagingResult::new(CodedConcept::coded("399208008", SNOMED, "Chest X-ray"));
        record.performed = Some(Timestamp::ymd(2023, 2, 9));
        record.findings = Some("No acute cardiopulmonary abnormality.".to_string());
        let entry = &build(&[record])[0];
        assert!(entry
            .values
            .iter()
            .any(|v| matches!(v, EntryValue::Text(_))));
        assert!(entry.effective_time.is_some());
    }
}
