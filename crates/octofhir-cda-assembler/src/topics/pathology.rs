//! Pathology result entries
//!
//! Each report becomes one organizer; each analyte becomes an observation
//! component under it, carrying the measured value and its reference range.

use crate::records::{Analyte, PathologyResult};
use octofhir_cda_model::{
    ClinicalStatement, EntryValue, ReferenceRange, RelationshipType, StatementBuilder,
    StatementStatus,
};
use octofhir_cda_types::TemporalValue;

/// One organizer per report, one observation per analyte
pub fn build(records: &[PathologyResult]) -> Vec<ClinicalStatement> {
    records.iter().map(build_one).collect()
}

fn build_one(record: &PathologyResult) -> ClinicalStatement {
    let mut builder = StatementBuilder::organizer().code(record.test.clone());
    if let Some(collected) = &record.collected {
        builder = builder.effective_time(TemporalValue::instant(*collected));
    }
    if let Some(status) = record
        .status_text
        .as_deref()
        .and_then(StatementStatus::parse_loose)
    {
        builder = builder.status(status);
    }
    if let Some(specimen) = &record.specimen {
        let child = StatementBuilder::observation().code(specimen.clone()).build();
        builder = builder.relationship(RelationshipType::Subject, false, child);
    }
    for analyte in &record.analytes {
        builder = builder.component(build_analyte(analyte));
    }
    builder.build()
}

fn build_analyte(analyte: &Analyte) -> ClinicalStatement {
    let mut builder = StatementBuilder::observation().code(analyte.code.clone());
    if let Some(value) = &analyte.value {
        builder = builder.value(value.clone());
    } else if let Some(text) = &analyte.value_text {
        builder = builder.value(EntryValue::Text(text.clone()));
    }
    if let Some(range) = &analyte.normal_range {
        builder = builder.reference_range(ReferenceRange {
            range: range.clone(),
            meaning: None,
        });
    }
    if let Some(interpretation) = &analyte.interpretation {
        builder = builder.value(interpretation.clone());
    }
    builder.build()
}
