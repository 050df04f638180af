// src/llm/mod.rs
pub mod client;
pub mod models;

use async_trait::async_trait;

use crate::utils::error::LlmError;

pub use client::GeminiClient;

/// Text returned by a single generation call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub text: String,
}

/// The text-generation capability the pipeline depends on.
///
/// Injected into the orchestrator so tests can swap in a deterministic stub.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<Completion, LlmError>;
}
