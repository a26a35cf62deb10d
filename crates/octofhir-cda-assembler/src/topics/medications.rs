//! Medication entries

use crate::records::Medication;
use octofhir_cda_model::{
    ClinicalStatement, RelationshipType, StatementBuilder, StatementKind, StatementStatus,
};

/// One substance administration per medication record
pub fn build(records: &[Medication]) -> Vec<ClinicalStatement> {
    records.iter().map(build_one).collect()
}

fn build_one(record: &Medication) -> ClinicalStatement {
    let mut builder =
        StatementBuilder::new(StatementKind::SubstanceAdministration).code(record.medicine.clone());
    if let Some(id) = &record.id {
        builder = builder.id(id.clone());
    }
    if let Some(directions) = &record.directions {
        builder = builder.text(directions.clone());
    }
    if let Some(route) = &record.route {
        builder = builder.route_code(route.clone());
    }
    if let Some(dose) = &record.dose {
        builder = builder.dose_quantity(dose.clone());
    }
    if let Some(status) = record
        .status_text
        .as_deref()
        .and_then(StatementStatus::parse_loose)
    {
        builder = builder.status(status);
    }
    if let Some(period) = &record.period {
        builder = builder.effective_time(period.clone());
    }
    if let Some(reason) = &record.reason {
        let indication = StatementBuilder::observation().code(reason.clone()).build();
        builder = builder.relationship(RelationshipType::Reason, true, indication);
    }
    builder.build()
}
