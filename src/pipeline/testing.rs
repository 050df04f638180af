// src/pipeline/testing.rs
//! Deterministic generators for pipeline tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::llm::{Completion, TextGenerator};
use crate::utils::error::LlmError;

/// Text that only the outline prompt contains.
pub const OUTLINE_MARKER: &str = "Return the outline as JSON";

const SECTION_LEAD: &str = "Write the content of the section \"";

/// Answers the outline prompt with a fixed response and every section prompt
/// with `section_text(section_title)`. Records each prompt it receives.
pub struct ScriptedGenerator {
    outline_response: String,
    section_text: Box<dyn Fn(&str) -> String + Send + Sync>,
    prompts: Mutex<Vec<String>>,
    section_calls: AtomicUsize,
    reversed_latency: bool,
}

impl ScriptedGenerator {
    pub fn new<F>(outline_response: &str, section_text: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        Self {
            outline_response: outline_response.to_string(),
            section_text: Box::new(section_text),
            prompts: Mutex::new(Vec::new()),
            section_calls: AtomicUsize::new(0),
            reversed_latency: false,
        }
    }

    /// Earlier section calls take longer, so concurrent calls finish in reverse.
    pub fn with_reversed_latency(mut self) -> Self {
        self.reversed_latency = true;
        self
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn complete(&self, prompt: &str) -> Result<Completion, LlmError> {
        self.prompts.lock().unwrap().push(prompt.to_string());

        if prompt.contains(OUTLINE_MARKER) {
            return Ok(Completion { text: self.outline_response.clone() });
        }

        let call = self.section_calls.fetch_add(1, Ordering::SeqCst);
        if self.reversed_latency {
            let delay = 20u64.saturating_mul(5u64.saturating_sub(call as u64));
            tokio::time::sleep(Duration::from_millis(delay)).await;
        }

        let section = prompt
            .split_once(SECTION_LEAD)
            .and_then(|(_, rest)| rest.split_once('"'))
            .map(|(title, _)| title)
            .unwrap_or_default();
        Ok(Completion { text: (self.section_text)(section) })
    }
}

/// Always fails, as an exhausted quota would.
pub struct FailingGenerator;

#[async_trait]
impl TextGenerator for FailingGenerator {
    async fn complete(&self, _prompt: &str) -> Result<Completion, LlmError> {
        Err(LlmError::RateLimited)
    }
}
