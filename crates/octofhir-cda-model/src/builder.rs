//! Statement builder - the single construction path for tree nodes
//!
//! `StatementBuilder::new(kind)` bakes the class/mood pair in from the kind;
//! nothing a caller supplies can change it. Construction never fails:
//! building a statement with an empty code for a kind that requires one
//! returns the statement carrying a validation flag, deferred to the
//! composer's single validation pass. Fail late, fail centrally.

use crate::{
    Author, ClinicalStatement, EntryRelationship, EntryValue, Participant, Performer,
    ReferenceRange, RelationshipType, StatementKind, StatementStatus,
};
use octofhir_cda_types::{
    CodedConcept, InstanceIdentifier, PhysicalQuantity, TemplateId, TemporalValue,
};
use smallvec::SmallVec;

/// Fluent builder for [`ClinicalStatement`]
#[derive(Debug, Clone)]
pub struct StatementBuilder {
    kind: StatementKind,
    ids: Vec<InstanceIdentifier>,
    template_ids: SmallVec<[TemplateId; 4]>,
    code: Option<CodedConcept>,
    status: Option<StatementStatus>,
    effective_time: Option<TemporalValue>,
    values: Vec<EntryValue>,
    reference_ranges: Vec<ReferenceRange>,
    text: Option<String>,
    route_code: Option<CodedConcept>,
    dose_quantity: Option<PhysicalQuantity>,
    participants: Vec<Participant>,
    performers: Vec<Performer>,
    authors: Vec<Author>,
    relationships: Vec<EntryRelationship>,
}

impl StatementBuilder {
    /// Start building a statement of the given kind
    pub fn new(kind: StatementKind) -> Self {
        Self {
            kind,
            ids: Vec::new(),
            template_ids: SmallVec::new(),
            code: None,
            status: None,
            effective_time: None,
            values: Vec::new(),
            reference_ranges: Vec::new(),
            text: None,
            route_code: None,
            dose_quantity: None,
            participants: Vec::new(),
            performers: Vec::new(),
            authors: Vec::new(),
            relationships: Vec::new(),
        }
    }

    /// Shorthand for an observation builder
    pub fn observation() -> Self {
        Self::new(StatementKind::Observation)
    }

    /// Shorthand for an organizer builder
    pub fn organizer() -> Self {
        Self::new(StatementKind::Organizer)
    }

    /// Append an instance identifier
    pub fn id(mut self, id: InstanceIdentifier) -> Self {
        self.ids.push(id);
        self
    }

    /// Append a conformance template identifier
    pub fn template_id(mut self, id: TemplateId) -> Self {
        self.template_ids.push(id);
        self
    }

    /// Set the statement code
    pub fn code(mut self, code: CodedConcept) -> Self {
        self.code = Some(code);
        self
    }

    /// Set the normalized status
    pub fn status(mut self, status: StatementStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Set the clinically effective time
    pub fn effective_time(mut self, time: TemporalValue) -> Self {
        self.effective_time = Some(time);
        self
    }

    /// Append a value, preserving insertion order
    pub fn value(mut self, value: impl Into<EntryValue>) -> Self {
        self.values.push(value.into());
        self
    }

    /// Append a reference range for an observation value
    pub fn reference_range(mut self, range: ReferenceRange) -> Self {
        self.reference_ranges.push(range);
        self
    }

    /// Set the narrative reference text
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Set the route of administration
    pub fn route_code(mut self, route: CodedConcept) -> Self {
        self.route_code = Some(route);
        self
    }

    /// Set the dose per administration
    pub fn dose_quantity(mut self, dose: PhysicalQuantity) -> Self {
        self.dose_quantity = Some(dose);
        self
    }

    /// Append a participation
    pub fn participant(mut self, participant: Participant) -> Self {
        self.participants.push(participant);
        self
    }

    /// Append a performer
    pub fn performer(mut self, performer: Performer) -> Self {
        self.performers.push(performer);
        self
    }

    /// Append an author
    pub fn author(mut self, author: Author) -> Self {
        self.authors.push(author);
        self
    }

    /// Append a child statement under a labelled edge
    ///
    /// Nesting is unbounded and recursive; insertion order is preserved and
    /// never reordered.
    pub fn relationship(
        mut self,
        relationship_type: RelationshipType,
        inverted: bool,
        statement: ClinicalStatement,
    ) -> Self {
        self.relationships
            .push(EntryRelationship::new(relationship_type, inverted, statement));
        self
    }

    /// Append a non-inverted component child
    pub fn component(self, statement: ClinicalStatement) -> Self {
        self.relationship(RelationshipType::Component, false, statement)
    }

    /// Build the statement
    ///
    /// Never fails; a kind that requires a code but got none (or an empty
    /// one) yields `missing_mandatory_code = true` for the validation pass.
    pub fn build(self) -> ClinicalStatement {
        let missing_mandatory_code = self.kind.requires_code()
            && self.code.as_ref().is_none_or(|c| c.is_empty() && c.null_flavor.is_none());
        ClinicalStatement {
            kind: self.kind,
            ids: self.ids,
            template_ids: self.template_ids,
            code: self.code,
            status: self.status,
            effective_time: self.effective_time,
            values: self.values,
            reference_ranges: self.reference_ranges,
            text: self.text,
            route_code: self.route_code,
            dose_quantity: self.dose_quantity,
            participants: self.participants,
            performers: self.performers,
            authors: self.authors,
            relationships: self.relationships,
            missing_mandatory_code,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use octofhir_cda_types::{NullFlavor, Timestamp};

    fn snomed(code: &str, display: &str) -> CodedConcept {
        CodedConcept::coded(code, "2.16.840.1.113883.6.96", display)
    }

    #[test]
    fn test_role_pair_ignores_payload() {
        let plain = StatementBuilder::observation().build();
        let loaded = StatementBuilder::observation()
            .code(snomed("271649006", "Systolic blood pressure"))
            .value(PhysicalQuantity::new(120.into(), "mm[Hg]"))
            .status(StatementStatus::Completed)
            .build();
        assert_eq!(plain.class_code(), loaded.class_code());
        assert_eq!(plain.mood_code(), loaded.mood_code());
    }

    #[test]
    fn test_missing_code_flags_instead_of_failing() {
        let statement = StatementBuilder::new(StatementKind::Procedure).build();
        assert!(statement.missing_mandatory_code);

        let coded = StatementBuilder::new(StatementKind::Procedure)
            .code(snomed("80146002", "Appendicectomy"))
            .build();
        assert!(!coded.missing_mandatory_code);
    }

    #[test]
    fn test_null_flavored_code_satisfies_requirement() {
        let statement = StatementBuilder::observation()
            .code(CodedConcept::null(NullFlavor::Unknown))
            .build();
        assert!(!statement.missing_mandatory_code);
    }

    #[test]
    fn test_kinds_without_code_requirement_never_flag() {
        let statement = StatementBuilder::new(StatementKind::SubstanceAdministration).build();
        assert!(!statement.missing_mandatory_code);
    }

    #[test]
    fn test_relationship_insertion_order_preserved() {
        let child = |code: &str| {
            StatementBuilder::observation()
                .code(snomed(code, "finding"))
                .build()
        };
        let parent = StatementBuilder::organizer()
            .relationship(RelationshipType::Component, false, child("first"))
            .relationship(RelationshipType::Reason, true, child("second"))
            .relationship(RelationshipType::Component, false, child("third"))
            .build();

        let codes: Vec<_> = parent
            .relationships
            .iter()
            .map(|r| r.statement.code.as_ref().unwrap().code.clone().unwrap())
            .collect();
        assert_eq!(codes, vec!["first", "second", "third"]);
        assert!(parent.relationships[1].inverted);
    }

    #[test]
    fn test_recursive_nesting() {
        let leaf = StatementBuilder::observation()
            .code(snomed("419199007", "Allergy to substance"))
            .effective_time(TemporalValue::instant(Timestamp::ymd(2021, 3, 14)))
            .build();
        let inner = StatementBuilder::organizer().component(leaf).build();
        let outer = StatementBuilder::observation()
            .code(snomed("416098002", "Drug allergy"))
            .component(inner)
            .build();

        // Walk visits outer, inner, leaf in depth-first insertion order.
        let kinds: Vec<_> = outer.walk().map(|s| s.kind).collect();
        assert_eq!(
            kinds,
            vec![
                StatementKind::Observation,
                StatementKind::Organizer,
                StatementKind::Observation
            ]
        );
    }
}
