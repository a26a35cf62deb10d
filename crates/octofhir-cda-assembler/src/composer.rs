//! Document composition and the deferred validation pass
//!
//! Builders never fail on clinical content; they flag. The composer walks
//! the finished sections exactly once, collects every flagged problem into
//! one report, and only hands out an envelope when the report carries no
//! errors. A caller therefore sees the complete list of problems in one
//! pass instead of fixing them one exception at a time.

use log::{debug, warn};
use octofhir_cda_diagnostics::{
    error_code, DocumentPath, IssueDetail, Severity, ValidationFailure, ValidationIssue,
};
use octofhir_cda_model::{
    Author, ClinicalStatement, Coverage, DocumentEnvelope, DocumentStatus, EntryValue, Section,
};
use octofhir_cda_templates::{resolve, DocumentSelector};
use octofhir_cda_types::{
    CodedConcept, InstanceIdentifier, PhysicalQuantity, QuantityInterval, Timestamp,
};

/// Envelope-level metadata for one composition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentMeta {
    /// Which document to compose
    pub selector: DocumentSelector,
    /// Document instance identifier
    pub id: InstanceIdentifier,
    /// Identifier shared across versions
    pub set_id: Option<InstanceIdentifier>,
    /// Version within the set
    pub version_number: Option<u32>,
    /// Clinically effective time
    pub effective_time: Timestamp,
    /// Lifecycle status
    pub status: Option<DocumentStatus>,
    /// Confidentiality code
    pub confidentiality: Option<CodedConcept>,
    /// Title override; the profile's default title applies when absent
    pub title: Option<String>,
    /// Document-level authors
    pub authors: Vec<Author>,
    /// Envelope-scoped coverage
    pub coverages: Vec<Coverage>,
}

impl DocumentMeta {
    /// Create metadata with the fields every document needs
    pub fn new(selector: DocumentSelector, id: InstanceIdentifier, effective_time: Timestamp) -> Self {
        Self {
            selector,
            id,
            set_id: None,
            version_number: None,
            effective_time,
            status: None,
            confidentiality: None,
            title: None,
            authors: Vec::new(),
            coverages: Vec::new(),
        }
    }

    /// Set the version identity
    pub fn versioned(mut self, set_id: InstanceIdentifier, version_number: u32) -> Self {
        self.set_id = Some(set_id);
        self.version_number = Some(version_number);
        self
    }

    /// Override the profile's default title
    pub fn titled(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Append a document-level author
    pub fn with_author(mut self, author: Author) -> Self {
        self.authors.push(author);
        self
    }

    /// Attach envelope-scoped coverage
    pub fn with_coverage(mut self, coverage: Coverage) -> Self {
        self.coverages.push(coverage);
        self
    }
}

/// A composed envelope together with the non-blocking findings of the
/// validation pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Composition {
    /// The assembled document
    pub envelope: DocumentEnvelope,
    /// Warning- and info-severity issues; the envelope may still be emitted
    pub warnings: Vec<ValidationIssue>,
}

/// Compose the envelope, running the single validation pass
///
/// Either every check passes and the full envelope is returned together
/// with any warnings, or every collected error comes back together; no
/// partial envelope escapes. The pass covers everything reachable from the
/// envelope: entries, envelope and section metadata, coverage, authorship,
/// reference ranges, and nested concept translations and qualifiers.
pub fn compose(
    meta: DocumentMeta,
    sections: Vec<Section>,
) -> Result<Composition, ValidationFailure> {
    let mut issues = Vec::new();

    let profile = match resolve(&meta.selector) {
        Ok(profile) => Some(profile),
        Err(err) => {
            warn!("profile resolution failed: {err}");
            issues.push(ValidationIssue::error(
                error_code::CDA0202,
                IssueDetail::TemplateChainConflict {
                    document_type: meta.selector.document_type.name().to_string(),
                    subtype: meta.selector.subtype.map(|s| s.name().to_string()),
                },
                DocumentPath::root(),
            ));
            None
        }
    };

    if let Some(profile) = &profile {
        for topic in &profile.mandatory_topics {
            let satisfied = sections
                .iter()
                .any(|s| s.topic == *topic && !s.is_empty_of_content());
            if !satisfied {
                issues.push(ValidationIssue::error(
                    error_code::CDA0300,
                    IssueDetail::MissingMandatoryTopic {
                        topic: topic.name().to_string(),
                    },
                    DocumentPath::root().child(format!("section[{topic}]")),
                ));
            }
        }
    }

    if let Some(confidentiality) = &meta.confidentiality {
        check_concept(
            confidentiality,
            &DocumentPath::root().child("confidentiality"),
            &mut issues,
        );
    }
    for (index, author) in meta.authors.iter().enumerate() {
        check_author(author, &DocumentPath::root().indexed("author", index), &mut issues);
    }
    for (index, coverage) in meta.coverages.iter().enumerate() {
        check_coverage(
            coverage,
            &DocumentPath::root().indexed("coverage", index),
            &mut issues,
        );
    }

    for section in &sections {
        validate_section(section, &DocumentPath::root(), &mut issues);
    }

    debug!(
        "validation pass over {} section(s): {} issue(s)",
        sections.len(),
        issues.len()
    );

    let has_errors = issues.iter().any(|i| i.severity == Severity::Error);
    match (profile, has_errors) {
        (Some(profile), false) => {
            for warning in &issues {
                warn!("{warning}");
            }
            let envelope = DocumentEnvelope {
                document_type: profile.document_type,
                subtype: profile.subtype,
                template_id_chain: profile.template_id_chain,
                type_code: profile.type_code,
                title: meta.title.unwrap_or(profile.default_title),
                id: meta.id,
                set_id: meta.set_id,
                version_number: meta.version_number,
                effective_time: meta.effective_time,
                status: meta.status,
                confidentiality: meta.confidentiality,
                authors: meta.authors,
                coverages: meta.coverages,
                sections,
            };
            Ok(Composition {
                envelope,
                warnings: issues,
            })
        }
        _ => Err(ValidationFailure::new(issues)),
    }
}

fn validate_section(section: &Section, parent: &DocumentPath, issues: &mut Vec<ValidationIssue>) {
    let path = parent.child(format!("section[{}]", section.topic));
    for (index, author) in section.authors.iter().enumerate() {
        check_author(author, &path.indexed("author", index), issues);
    }
    for (index, coverage) in section.coverages.iter().enumerate() {
        check_coverage(coverage, &path.indexed("coverage", index), issues);
    }
    for (index, entry) in section.entries.iter().enumerate() {
        validate_statement(entry, &path.indexed("entry", index), issues);
    }
    for subsection in &section.subsections {
        validate_section(subsection, &path, issues);
    }
}

fn validate_statement(
    statement: &ClinicalStatement,
    path: &DocumentPath,
    issues: &mut Vec<ValidationIssue>,
) {
    if statement.missing_mandatory_code {
        issues.push(ValidationIssue::error(
            error_code::CDA0100,
            IssueDetail::MissingStatementCode {
                statement_kind: statement.kind.name().to_string(),
            },
            path.child("code"),
        ));
    }
    if let Some(code) = &statement.code {
        check_concept(code, &path.child("code"), issues);
    }
    if let Some(route) = &statement.route_code {
        check_concept(route, &path.child("routeCode"), issues);
    }
    if let Some(dose) = &statement.dose_quantity {
        check_quantity(dose, &path.child("doseQuantity"), issues);
    }
    for (index, value) in statement.values.iter().enumerate() {
        let value_path = path.indexed("value", index);
        match value {
            EntryValue::Coded(concept) => check_concept(concept, &value_path, issues),
            EntryValue::Quantity(quantity) => check_quantity(quantity, &value_path, issues),
            EntryValue::Ratio(ratio) => {
                check_quantity(&ratio.numerator, &value_path.child("numerator"), issues);
                check_quantity(&ratio.denominator, &value_path.child("denominator"), issues);
            }
            EntryValue::Range(range) => check_range(range, &value_path, issues),
            _ => {}
        }
    }
    for (index, range) in statement.reference_ranges.iter().enumerate() {
        let range_path = path.indexed("referenceRange", index);
        if let Some(meaning) = &range.meaning {
            check_concept(meaning, &range_path.child("meaning"), issues);
        }
        check_range(&range.range, &range_path, issues);
    }
    for (index, author) in statement.authors.iter().enumerate() {
        check_author(author, &path.indexed("author", index), issues);
    }
    for (index, performer) in statement.performers.iter().enumerate() {
        if let Some(function) = &performer.function {
            check_concept(function, &path.indexed("performer", index).child("function"), issues);
        }
    }
    for (index, relationship) in statement.relationships.iter().enumerate() {
        validate_statement(
            &relationship.statement,
            &path.indexed("relationship", index),
            issues,
        );
    }
}

fn check_concept(concept: &CodedConcept, path: &DocumentPath, issues: &mut Vec<ValidationIssue>) {
    if concept.is_incomplete() {
        issues.push(ValidationIssue::error(
            error_code::CDA0001,
            IssueDetail::IncompleteConcept,
            path.clone(),
        ));
    }
    for (index, translation) in concept.translations.iter().enumerate() {
        check_concept(translation, &path.indexed("translation", index), issues);
    }
    for (index, qualifier) in concept.qualifiers.iter().enumerate() {
        let qualifier_path = path.indexed("qualifier", index);
        check_concept(&qualifier.name, &qualifier_path.child("name"), issues);
        check_concept(&qualifier.value, &qualifier_path.child("value"), issues);
    }
}

fn check_author(author: &Author, path: &DocumentPath, issues: &mut Vec<ValidationIssue>) {
    if let Some(role) = &author.role {
        check_concept(role, &path.child("role"), issues);
    }
}

fn check_coverage(coverage: &Coverage, path: &DocumentPath, issues: &mut Vec<ValidationIssue>) {
    for (index, entitlement) in coverage.entitlements.iter().enumerate() {
        check_concept(
            &entitlement.code,
            &path.indexed("entitlement", index).child("code"),
            issues,
        );
    }
}

fn check_range(range: &QuantityInterval, path: &DocumentPath, issues: &mut Vec<ValidationIssue>) {
    if let Some(low) = &range.low {
        check_quantity(low, &path.child("low"), issues);
    }
    if let Some(high) = &range.high {
        check_quantity(high, &path.child("high"), issues);
    }
}

fn check_quantity(
    quantity: &PhysicalQuantity,
    path: &DocumentPath,
    issues: &mut Vec<ValidationIssue>,
) {
    if !quantity.unit_validated && quantity.null_flavor.is_none() {
        issues.push(ValidationIssue::warning(
            error_code::CDA0005,
            IssueDetail::UnknownUnit {
                unit: quantity.unit.clone(),
            },
            path.child("unit"),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exclusion::ExclusionReason;
    use crate::providers::{AssemblyContext, NullTerminology, OidIdentifierProvider, SilentRenderer};
    use crate::records::{AdverseReaction, Medication, TopicInput, TopicRecords};
    use crate::section::SectionAssembler;
    use octofhir_cda_model::{DocumentType, SectionTopic, StatementBuilder, StatementKind};
    use octofhir_cda_types::CodedConcept;
    use pretty_assertions::assert_eq;

    fn meta(document_type: DocumentType) -> DocumentMeta {
        DocumentMeta::new(
            DocumentSelector::new(document_type),
            InstanceIdentifier::with_extension("1.2.36.1.2001.1005.41", "doc-1").unwrap(),
            Timestamp::ymd_hm(2025, 11, 3, 9, 30).with_offset(600),
        )
    }

    fn shs_sections(inputs: Vec<TopicInput>) -> Vec<Section> {
        let profile = resolve(&DocumentSelector::new(DocumentType::SharedHealthSummary)).unwrap();
        let identifiers = OidIdentifierProvider::new("1.2.36.1.2001.1005.41").unwrap();
        let ctx = AssemblyContext::new(&identifiers, &NullTerminology, &SilentRenderer);
        let mut assembler = SectionAssembler::new(&profile, ctx);
        inputs
            .iter()
            .map(|input| assembler.assemble(input).unwrap())
            .collect()
    }

    fn full_shs_inputs() -> Vec<TopicInput> {
        let snomed = "2.16.840.1.113883.6.96";
        vec![
            TopicInput::new(TopicRecords::AdverseReactions(vec![AdverseReaction::new(
                CodedConcept::coded("372687004", snomed, "Amoxicillin"),
            )])),
            TopicInput::new(TopicRecords::Medications(vec![Medication::new(
                CodedConcept::coded("23641011000036102", "1.2.36.1.2001.1004.100", "paracetamol"),
            )])),
            TopicInput::new(TopicRecords::MedicalHistory(vec![]))
                .with_exclusion(ExclusionReason::NoneKnown),
            TopicInput::new(TopicRecords::Immunisations(vec![]))
                .with_exclusion(ExclusionReason::NotAsked),
        ]
    }

    #[test]
    fn test_complete_document_composes() {
        let composition = compose(
            meta(DocumentType::SharedHealthSummary),
            shs_sections(full_shs_inputs()),
        )
        .unwrap();
        let envelope = &composition.envelope;
        assert_eq!(envelope.document_type, DocumentType::SharedHealthSummary);
        assert_eq!(envelope.title, "Shared Health Summary");
        assert_eq!(envelope.sections.len(), 4);
        assert!(!envelope.template_id_chain.is_empty());
        assert!(composition.warnings.is_empty());
    }

    #[test]
    fn test_missing_mandatory_topic_fails_composition() {
        let mut inputs = full_shs_inputs();
        inputs.remove(3);
        let failure = compose(
            meta(DocumentType::SharedHealthSummary),
            shs_sections(inputs),
        )
        .unwrap_err();
        assert!(failure.has_errors());
        assert!(failure.issues.iter().any(|i| matches!(
            &i.detail,
            IssueDetail::MissingMandatoryTopic { topic } if topic == "immunisations"
        )));
    }

    #[test]
    fn test_empty_mandatory_topic_without_exclusion_fails() {
        let mut inputs = full_shs_inputs();
        inputs[2] = TopicInput::new(TopicRecords::MedicalHistory(vec![]));
        let failure = compose(
            meta(DocumentType::SharedHealthSummary),
            shs_sections(inputs),
        )
        .unwrap_err();
        assert!(failure.issues.iter().any(|i| matches!(
            &i.detail,
            IssueDetail::MissingMandatoryTopic { topic } if topic == "medicalHistory"
        )));
    }

    #[test]
    fn test_all_problems_come_back_together() {
        // Two flagged statements and one missing topic: one failure, three
        // issues.
        let mut sections = shs_sections(full_shs_inputs());
        sections[0]
            .entries
            .push(StatementBuilder::new(StatementKind::Procedure).build());
        sections[1].entries.push(
            StatementBuilder::observation()
                .code(CodedConcept::coded("271649006", "2.16.840.1.113883.6.96", "Systolic"))
                .value(CodedConcept::text(""))
                .build(),
        );
        sections.remove(3);

        let failure = compose(meta(DocumentType::SharedHealthSummary), sections).unwrap_err();
        assert_eq!(failure.len(), 3);
        assert!(failure.issues.iter().any(|i| matches!(
            i.detail,
            IssueDetail::MissingStatementCode { .. }
        )));
        assert!(failure
            .issues
            .iter()
            .any(|i| i.detail == IssueDetail::IncompleteConcept));
    }

    #[test]
    fn test_issue_paths_point_into_the_tree() {
        let mut sections = shs_sections(full_shs_inputs());
        sections[1]
            .entries
            .push(StatementBuilder::new(StatementKind::Act).build());
        let failure = compose(meta(DocumentType::SharedHealthSummary), sections).unwrap_err();
        let issue = &failure.issues[0];
        assert_eq!(
            issue.path.to_string(),
            "/section[medications]/entry[1]/code"
        );
    }

    #[test]
    fn test_unknown_combination_reports_chain_conflict() {
        let failure = compose(meta(DocumentType::AdvanceCareInformation), vec![]).unwrap_err();
        assert!(failure.issues.iter().any(|i| matches!(
            &i.detail,
            IssueDetail::TemplateChainConflict { document_type, .. }
                if document_type == "advanceCareInformation"
        )));
    }

    #[test]
    fn test_unknown_unit_is_a_warning_not_an_error() {
        use octofhir_cda_types::PhysicalQuantity;
        use rust_decimal::Decimal;

        let mut sections = shs_sections(full_shs_inputs());
        sections[1].entries.push(
            StatementBuilder::observation()
                .code(CodedConcept::coded("364075005", "2.16.840.1.113883.6.96", "Heart rate"))
                .value(PhysicalQuantity::new(Decimal::from(72), "beats"))
                .build(),
        );
        let composition = compose(meta(DocumentType::SharedHealthSummary), sections).unwrap();
        assert_eq!(composition.envelope.sections[1].entries.len(), 2);
        assert_eq!(composition.warnings.len(), 1);
        assert!(matches!(
            &composition.warnings[0].detail,
            IssueDetail::UnknownUnit { unit } if unit == "beats"
        ));
    }

    #[test]
    fn test_title_override_beats_profile_default() {
        let composition = compose(
            meta(DocumentType::SharedHealthSummary).titled("My Health Summary"),
            shs_sections(full_shs_inputs()),
        )
        .unwrap();
        assert_eq!(composition.envelope.title, "My Health Summary");
    }

    #[test]
    fn test_exclusion_statement_satisfies_mandatory_topic() {
        let composition = compose(
            meta(DocumentType::SharedHealthSummary),
            shs_sections(full_shs_inputs()),
        )
        .unwrap();
        let history = composition
            .envelope
            .sections
            .iter()
            .find(|s| s.topic == SectionTopic::MedicalHistory)
            .unwrap();
        assert!(history.has_exclusion_statement);
    }

    #[test]
    fn test_incomplete_concepts_outside_entries_are_collected() {
        use octofhir_cda_model::{Author, Coverage, CoverageRole, Entitlement};
        use octofhir_cda_types::ConceptBuilder;

        let blank = ConceptBuilder::new().build();
        let holder = InstanceIdentifier::with_extension("1.2.36.1.2001.1001.101", "card-1").unwrap();
        let mut meta = meta(DocumentType::SharedHealthSummary)
            .with_author(Author::new(holder.clone()).with_role(blank.clone()))
            .with_coverage(Coverage {
                role: CoverageRole::patient_holder(),
                participant_id: holder,
                entitlements: vec![Entitlement::new(blank.clone())],
            });
        meta.confidentiality = Some(blank);

        let failure = compose(meta, shs_sections(full_shs_inputs())).unwrap_err();
        let paths: Vec<String> = failure
            .issues
            .iter()
            .filter(|i| i.detail == IssueDetail::IncompleteConcept)
            .map(|i| i.path.to_string())
            .collect();
        assert_eq!(
            paths,
            vec![
                "/confidentiality",
                "/author[0]/role",
                "/coverage[0]/entitlement[0]/code",
            ]
        );
    }

    #[test]
    fn test_incomplete_translation_inside_complete_concept_is_collected() {
        use octofhir_cda_types::ConceptBuilder;

        let mut code =
            CodedConcept::coded("271649006", "2.16.840.1.113883.6.96", "Systolic");
        code.translations.push(ConceptBuilder::new().build());
        let mut sections = shs_sections(full_shs_inputs());
        sections[1]
            .entries
            .push(StatementBuilder::observation().code(code).build());

        let failure = compose(meta(DocumentType::SharedHealthSummary), sections).unwrap_err();
        assert_eq!(failure.len(), 1);
        assert_eq!(
            failure.issues[0].path.to_string(),
            "/section[medications]/entry[1]/code/translation[0]"
        );
    }

    #[test]
    fn test_incomplete_reference_range_meaning_is_collected() {
        use octofhir_cda_model::ReferenceRange;
        use octofhir_cda_types::{ConceptBuilder, PhysicalQuantity, QuantityInterval};
        use rust_decimal::Decimal;

        let mut sections = shs_sections(full_shs_inputs());
        sections[1].entries.push(
            StatementBuilder::observation()
                .code(CodedConcept::coded("2093-3", "2.16.840.1.113883.6.1", "Total cholesterol"))
                .value(PhysicalQuantity::new(Decimal::new(52, 1), "mmol/L"))
                .reference_range(ReferenceRange {
                    range: QuantityInterval::at_most(PhysicalQuantity::new(
                        Decimal::new(55, 1),
                        "mmol/L",
                    )),
                    meaning: Some(ConceptBuilder::new().build()),
                })
                .build(),
        );

        let failure = compose(meta(DocumentType::SharedHealthSummary), sections).unwrap_err();
        assert_eq!(failure.len(), 1);
        assert_eq!(
            failure.issues[0].path.to_string(),
            "/section[medications]/entry[1]/referenceRange[0]/meaning"
        );
    }
}
