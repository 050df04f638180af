// src/pipeline/secretary.rs
use std::sync::Arc;

use futures_util::{stream, StreamExt, TryStreamExt};

use crate::extractors::json::extract_json;
use crate::llm::TextGenerator;
use crate::pipeline::outline::{Outline, SectionContent};
use crate::pipeline::prompts::{outline_prompt, section_prompt};
use crate::utils::debug_dump::DebugDump;
use crate::utils::error::LlmError;

/// Drives the generation calls for one transcript: an outline first, then
/// one call per section.
pub struct MeetingSecretary {
    generator: Arc<dyn TextGenerator>,
    sections: Vec<String>,
    workers: usize,
    debug: Option<DebugDump>,
}

impl MeetingSecretary {
    pub fn new(generator: Arc<dyn TextGenerator>, sections: Vec<String>) -> Self {
        Self {
            generator,
            sections,
            workers: 1,
            debug: None,
        }
    }

    /// Number of section calls allowed in flight at once (at least 1).
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    pub fn with_debug_dump(mut self, dump: DebugDump) -> Self {
        self.debug = Some(dump);
        self
    }

    /// Asks for an outline and recovers it from the response. Unparseable
    /// output gives an empty outline; only a failed call is an error.
    pub async fn generate_outline(&self, transcript: &str) -> Result<Outline, LlmError> {
        let prompt = outline_prompt(&self.sections, transcript);
        let response = self.generator.complete(&prompt).await?;
        self.dump("outline_response.txt", &response.text);

        let extraction = extract_json(&response.text);
        let outline = Outline::from_json(&extraction.value);
        tracing::info!(
            "Outline extracted via {:?} with {} sections",
            extraction.strategy,
            outline.len()
        );

        if let Ok(pretty) = serde_json::to_string_pretty(&extraction.value) {
            self.dump("outline.json", &pretty);
        }

        if outline.is_empty() {
            tracing::warn!("Outline is empty; every section is generated from the transcript alone");
        } else {
            let missing = outline.missing_sections(&self.sections);
            if !missing.is_empty() {
                tracing::warn!("Outline has no key points for: {:?}", missing);
            }
        }

        Ok(outline)
    }

    /// Generates the markup for one section.
    ///
    /// Sections the outline does not cover are still generated, from the
    /// transcript alone.
    pub async fn generate_section_content(
        &self,
        section: &str,
        outline: &Outline,
        transcript: &str,
    ) -> Result<String, LlmError> {
        let key_points = outline.key_points(section);
        if key_points.is_empty() {
            tracing::warn!("No outline guidance for section '{}'; generating from transcript only", section);
        } else {
            tracing::debug!("Generating section '{}' with {} key points", section, key_points.len());
        }

        let prompt = section_prompt(section, key_points, transcript);
        let response = self.generator.complete(&prompt).await?;
        self.dump(&format!("section_{}.md", section), &response.text);

        tracing::info!("Generated section '{}' ({} bytes)", section, response.text.len());
        Ok(response.text)
    }

    /// Runs the outline call, then every section call, and returns the
    /// section markup in the configured section order.
    pub async fn process(&self, transcript: &str) -> Result<SectionContent, LlmError> {
        tracing::info!(
            "Processing transcript ({} bytes, {} sections, {} workers)",
            transcript.len(),
            self.sections.len(),
            self.workers
        );

        let outline = self.generate_outline(transcript).await?;

        // Collected up front so the future stays `Send` when awaited under a lock.
        let calls: Vec<_> = self
            .sections
            .iter()
            .map(|section| self.generate_section_content(section, &outline, transcript))
            .collect();

        // `buffered` yields results in input order whatever order they finish in.
        let texts: Vec<String> = stream::iter(calls)
            .buffered(self.workers)
            .try_collect()
            .await?;

        let mut content = SectionContent::new();
        for (section, text) in self.sections.iter().zip(texts) {
            content.insert(section.clone(), text);
        }
        Ok(content)
    }

    fn dump(&self, name: &str, content: &str) {
        if let Some(dump) = &self.debug {
            dump.save(name, content);
        }
    }
}
