//! The generic section assembler
//!
//! One algorithm serves every document type and topic; everything that
//! varies between them comes from the resolved profile and the record
//! family. Assembly never inspects clinical content for validity; that is
//! the composer's job.

use crate::error::AssemblyError;
use crate::exclusion::exclusion_statement;
use crate::providers::{AssemblyContext, TerminologyProvider};
use crate::records::TopicInput;
use crate::topics;
use log::debug;
use octofhir_cda_model::{ClinicalStatement, EntryValue, NarrativeSource, Section, SectionTopic};
use octofhir_cda_templates::DocumentProfile;
use octofhir_cda_types::CodedConcept;
use std::collections::HashSet;

/// Assembles sections for one document
pub struct SectionAssembler<'a> {
    profile: &'a DocumentProfile,
    ctx: AssemblyContext<'a>,
    assembled: HashSet<SectionTopic>,
}

impl<'a> SectionAssembler<'a> {
    /// Create an assembler for a resolved profile
    pub fn new(profile: &'a DocumentProfile, ctx: AssemblyContext<'a>) -> Self {
        Self {
            profile,
            ctx,
            assembled: HashSet::new(),
        }
    }

    /// Assemble one section from its topic input
    ///
    /// "No data" means no entries. When the topic supports an exclusion
    /// statement, zero entries were built and the caller supplied a reason,
    /// exactly one exclusion entry is emitted instead of an empty section.
    pub fn assemble(&mut self, input: &TopicInput) -> Result<Section, AssemblyError> {
        let topic = input.records.topic();
        let def = self.profile.section_def(topic).ok_or_else(|| {
            AssemblyError::TopicNotInProfile {
                topic,
                document_type: self.profile.document_type,
            }
        })?;
        if !self.assembled.insert(topic) {
            return Err(AssemblyError::DuplicateTopic { topic });
        }

        let mut entries = topics::build_entries(&input.records);
        let mut has_exclusion_statement = false;
        if entries.is_empty()
            && topic.supports_exclusion_statement()
            && let Some(reason) = input.exclusion
        {
            entries.push(exclusion_statement(reason));
            has_exclusion_statement = true;
        }
        for entry in &mut entries {
            finalize_statement(entry, &self.ctx);
        }

        let (title, text) = match &input.narrative {
            NarrativeSource::Custom(custom) => (Some(def.title.clone()), Some(custom.clone())),
            NarrativeSource::Generated => (
                Some(def.title.clone()),
                self.ctx.renderer.render(topic, &input.records),
            ),
            NarrativeSource::Suppressed => (None, None),
        };

        debug!(
            "assembled {topic}: {} entries, exclusion={has_exclusion_statement}",
            entries.len()
        );

        Ok(Section {
            topic,
            code: def.code.clone(),
            title,
            template_ids: def.template_ids.clone(),
            narrative: input.narrative.clone(),
            text,
            entries,
            subsections: Vec::new(),
            authors: input.authors.clone(),
            coverages: input.coverages.clone(),
            has_exclusion_statement,
        })
    }
}

/// Assign missing identifiers and backfill missing display names, depth
/// first over the statement tree
fn finalize_statement(statement: &mut ClinicalStatement, ctx: &AssemblyContext<'_>) {
    if statement.ids.is_empty() {
        statement.ids.push(ctx.identifiers.next_id());
    }
    if let Some(code) = &mut statement.code {
        backfill_display(code, ctx.terminology);
    }
    if let Some(route) = &mut statement.route_code {
        backfill_display(route, ctx.terminology);
    }
    for value in &mut statement.values {
        if let EntryValue::Coded(concept) = value {
            backfill_display(concept, ctx.terminology);
        }
    }
    for relationship in &mut statement.relationships {
        finalize_statement(&mut relationship.statement, ctx);
    }
}

fn backfill_display(concept: &mut CodedConcept, terminology: &dyn TerminologyProvider) {
    if concept.display_name.is_some() {
        return;
    }
    if let (Some(code), Some(system)) = (&concept.code, &concept.code_system) {
        concept.display_name = terminology.display_name(system, code);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exclusion::ExclusionReason;
    use crate::providers::{NullTerminology, OidIdentifierProvider, SilentRenderer};
    use crate::records::{AdverseReaction, Medication, TopicRecords};
    use octofhir_cda_model::{DocumentType, SectionTopic};
    use octofhir_cda_templates::{resolve, DocumentSelector};
    use octofhir_cda_types::CodedConcept;
    use pretty_assertions::assert_eq;

    fn with_assembler<T>(run: impl FnOnce(&mut SectionAssembler<'_>) -> T) -> T {
        let profile = resolve(&DocumentSelector::new(DocumentType::SharedHealthSummary)).unwrap();
        let identifiers = OidIdentifierProvider::new("1.2.36.1.2001.1005.41").unwrap();
        let ctx = AssemblyContext::new(&identifiers, &NullTerminology, &SilentRenderer);
        let mut assembler = SectionAssembler::new(&profile, ctx);
        run(&mut assembler)
    }

    #[test]
    fn test_records_become_entries_with_assigned_ids() {
        let section = with_assembler(|assembler| {
            let input = TopicInput::new(TopicRecords::Medications(vec![Medication::new(
                CodedConcept::text("fish oil"),
            )]));
            assembler.assemble(&input).unwrap()
        });
        assert_eq!(section.topic, SectionTopic::Medications);
        assert_eq!(section.entries.len(), 1);
        assert!(!section.entries[0].ids.is_empty());
        assert!(!section.has_exclusion_statement);
    }

    #[test]
    fn test_empty_supported_topic_with_reason_gets_exclusion_statement() {
        let section = with_assembler(|assembler| {
            let input = TopicInput::new(TopicRecords::Medications(vec![]))
                .with_exclusion(ExclusionReason::NoneSupplied);
            assembler.assemble(&input).unwrap()
        });
        assert!(section.has_exclusion_statement);
        assert_eq!(section.entries.len(), 1);
        assert!(!section.is_empty_of_content());
    }

    #[test]
    fn test_empty_topic_without_reason_stays_empty() {
        let section = with_assembler(|assembler| {
            let input = TopicInput::new(TopicRecords::Medications(vec![]));
            assembler.assemble(&input).unwrap()
        });
        assert!(section.entries.is_empty());
        assert!(section.is_empty_of_content());
    }

    #[test]
    fn test_exclusion_never_replaces_real_entries() {
        let section = with_assembler(|assembler| {
            let input = TopicInput::new(TopicRecords::AdverseReactions(vec![
                AdverseReaction::new(CodedConcept::text("penicillin")),
            ]))
            .with_exclusion(ExclusionReason::NoneKnown);
            assembler.assemble(&input).unwrap()
        });
        assert!(!section.has_exclusion_statement);
        assert_eq!(section.entries.len(), 1);
    }

    #[test]
    fn test_custom_narrative_wins_over_generated() {
        let section = with_assembler(|assembler| {
            let input = TopicInput::new(TopicRecords::Medications(vec![Medication::new(
                CodedConcept::text("fish oil"),
            )]))
            .with_narrative(NarrativeSource::Custom("As dictated.".to_string()));
            assembler.assemble(&input).unwrap()
        });
        assert_eq!(section.text.as_deref(), Some("As dictated."));
        assert_eq!(section.title.as_deref(), Some("Medications"));
    }

    #[test]
    fn test_suppressed_narrative_clears_title_and_text() {
        let section = with_assembler(|assembler| {
            let input = TopicInput::new(TopicRecords::Medications(vec![Medication::new(
                CodedConcept::text("fish oil"),
            )]))
            .with_narrative(NarrativeSource::Suppressed);
            assembler.assemble(&input).unwrap()
        });
        assert_eq!(section.title, None);
        assert_eq!(section.text, None);
        assert_eq!(section.entries.len(), 1);
    }

    #[test]
    fn test_topic_outside_profile_is_rejected() {
        let err = with_assembler(|assembler| {
            let input = TopicInput::new(TopicRecords::Encounters(vec![]));
            assembler.assemble(&input).unwrap_err()
        });
        assert!(matches!(err, AssemblyError::TopicNotInProfile { .. }));
    }

    #[test]
    fn test_assembling_a_topic_twice_is_rejected() {
        with_assembler(|assembler| {
            let input = TopicInput::new(TopicRecords::Medications(vec![]));
            assembler.assemble(&input).unwrap();
            let err = assembler.assemble(&input).unwrap_err();
            assert_eq!(
                err,
                AssemblyError::DuplicateTopic {
                    topic: SectionTopic::Medications
                }
            );
        });
    }
}
