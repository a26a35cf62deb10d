//! Encounter entries

use crate::records::EncounterRecord;
use octofhir_cda_model::{ClinicalStatement, StatementBuilder, StatementKind};

/// One encounter statement per record
pub fn build(records: &[EncounterRecord]) -> Vec<ClinicalStatement> {
    records.iter().map(build_one).collect()
}

fn build_one(record: &EncounterRecord) -> ClinicalStatement {
    let mut builder = StatementBuilder::new(StatementKind::Encounter).code(record.encounter_type.clone());
    if let Some(period) = &record.period {
        builder = builder.effective_time(period.clone());
    }
    if let Some(location) = &record.location_name {
        builder = builder.text(location.clone());
    }
    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use octofhir_cda_types::{CodedConcept, TemporalValue, Timestamp};

    #[test]
    fn test_encounter_entry_shape() {
        let mut record = EncounterRecord::new(CodedConcept::coded(
            "308335008",
            "2.16.840.1.113883.6.96",
            "Patient encounter procedure",
        ));
        record.period = Some(TemporalValue::between(
            Timestamp::ymd(2024, 1, 3),
            Timestamp::ymd(2024, 1, 7),
        ));
        let entry = &build(&[record])[0];
        assert_eq!(entry.kind, StatementKind::Encounter);
        assert!(entry.effective_time.is_some());
    }
}
