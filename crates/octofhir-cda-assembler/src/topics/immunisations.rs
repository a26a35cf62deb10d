//! Immunisation entries

use crate::records::Immunisation;
use octofhir_cda_model::{ClinicalStatement, EntryValue, StatementBuilder, StatementKind, StatementStatus};
use octofhir_cda_types::TemporalValue;

/// One completed substance administration per immunisation
pub fn build(records: &[Immunisation]) -> Vec<ClinicalStatement> {
    records.iter().map(build_one).collect()
}

fn build_one(record: &Immunisation) -> ClinicalStatement {
    let mut builder = StatementBuilder::new(StatementKind::SubstanceAdministration)
        .code(record.vaccine.clone())
        .status(StatementStatus::Completed);
    if let Some(administered) = &record.administered {
        builder = builder.effective_time(TemporalValue::instant(*administered));
    }
    if let Some(sequence) = record.sequence_number {
        builder = builder.value(EntryValue::Integer(i64::from(sequence)));
    }
    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use octofhir_cda_types::{CodedConcept, Timestamp};

    #[test]
    fn test_immunisation_is_always_completed() {
        let record = Immunisation {
            vaccine: CodedConcept::coded("837621000168102", "1.2.36.1.2001.1004.100", "Comirnaty"),
            sequence_number: Some(2),
            administered: Some(Timestamp::ymd(2021, 8, 14)),
        };
        let entry = &build(&[record])[0];
        assert_eq!(entry.status, Some(StatementStatus::Completed));
        assert_eq!(entry.values, vec![EntryValue::Integer(2)]);
        assert!(entry.effective_time.is_some());
    }
}
