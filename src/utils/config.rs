// src/utils/config.rs
use std::path::PathBuf;

use clap::Args;

use crate::pipeline::outline::default_sections;
use crate::utils::error::AppError;

pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_OUTPUT_PATH: &str = "./data/Meeting_note.docx";

/// Process-wide settings, read once at startup.
/// Every flag can also come from the environment (or a `.env` file).
#[derive(Args, Clone)]
pub struct Settings {
    /// Generation model identifier
    #[arg(long, global = true, env = "GEMINI_MODEL", default_value = DEFAULT_MODEL)]
    pub model: String,

    /// API key for the generation service
    #[arg(long, global = true, env = "GOOGLE_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Base URL of the generation API
    #[arg(long, global = true, env = "GEMINI_API_BASE", default_value = DEFAULT_API_BASE)]
    pub api_base: String,

    /// Sampling temperature passed to the model
    #[arg(long, global = true, default_value_t = 0.8)]
    pub temperature: f32,

    /// Number of sections generated concurrently (1 = sequential)
    #[arg(long, global = true, env = "MEETING_NOTES_WORKERS", default_value_t = 1)]
    pub workers: usize,

    /// Where the rendered meeting note is written
    #[arg(short, long, global = true, default_value = DEFAULT_OUTPUT_PATH)]
    pub output: PathBuf,

    /// Section title, in order; repeat for each section (defaults to the standard three)
    #[arg(long = "section", global = true)]
    pub sections: Vec<String>,

    /// Debug mode - save raw model responses next to the output
    #[arg(short, long, global = true)]
    pub debug: bool,
}

impl Settings {
    /// Returns the API key or a configuration error naming the variable to set.
    pub fn require_api_key(&self) -> Result<&str, AppError> {
        match self.api_key.as_deref() {
            Some(key) if !key.trim().is_empty() => Ok(key),
            _ => Err(AppError::Config(
                "No API key configured. Set GOOGLE_API_KEY or pass --api-key".to_string(),
            )),
        }
    }

    /// Worker count clamped to at least one.
    pub fn worker_count(&self) -> usize {
        self.workers.max(1)
    }

    /// Configured section titles, or the default set when none were given.
    pub fn sections(&self) -> Vec<String> {
        if self.sections.is_empty() {
            default_sections()
        } else {
            self.sections.clone()
        }
    }

    /// Directory used for `--debug` dumps, next to the output file.
    pub fn debug_dir(&self) -> PathBuf {
        self.output
            .parent()
            .map(|p| p.join("debug"))
            .unwrap_or_else(|| PathBuf::from("debug"))
    }
}

// Keep the key out of any `{:?}` logging.
impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("model", &self.model)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("api_base", &self.api_base)
            .field("temperature", &self.temperature)
            .field("workers", &self.workers)
            .field("output", &self.output)
            .field("sections", &self.sections)
            .field("debug", &self.debug)
            .finish()
    }
}
