//! Mock collaborators

use octofhir_cda::assembler::{NarrativeRenderer, TerminologyProvider, TopicRecords};
use octofhir_cda::model::SectionTopic;
use std::collections::HashMap;

/// Terminology backed by a fixed map of (system, code) to display name
#[derive(Default)]
pub struct StaticTerminology {
    entries: HashMap<(String, String), String>,
}

impl StaticTerminology {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, system: &str, code: &str, display: &str) -> Self {
        self.entries
            .insert((system.to_string(), code.to_string()), display.to_string());
        self
    }
}

impl TerminologyProvider for StaticTerminology {
    fn display_name(&self, code_system: &str, code: &str) -> Option<String> {
        self.entries
            .get(&(code_system.to_string(), code.to_string()))
            .cloned()
    }
}

/// Renderer that reports the topic and record count, so tests can verify
/// the renderer saw the domain records rather than the built tree
pub struct CountingRenderer;

impl NarrativeRenderer for CountingRenderer {
    fn render(&self, topic: SectionTopic, records: &TopicRecords) -> Option<String> {
        if records.is_empty() {
            return None;
        }
        Some(format!("{topic}: {} record(s)", records.len()))
    }
}
