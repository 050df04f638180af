// src/pipeline/mod.rs
pub mod analyzer;
pub mod outline;
pub mod prompts;
pub mod secretary;

#[cfg(test)]
pub(crate) mod testing;

// Re-export key pipeline types for convenience
#[allow(unused_imports)]
pub use analyzer::MeetingAnalyzer;
#[allow(unused_imports)]
pub use outline::{default_sections, Outline, SectionContent, DEFAULT_SECTIONS};
#[allow(unused_imports)]
pub use secretary::MeetingSecretary;
