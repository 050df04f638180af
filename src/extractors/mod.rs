// src/extractors/mod.rs
pub mod json;
pub mod markup;

// Re-export key extraction types for convenience
#[allow(unused_imports)]
pub use json::{extract_json, Extraction, ExtractionStrategy, JsonMap};
#[allow(unused_imports)]
pub use markup::{classify, classify_lines, split_emphasis, MarkupLine, Span};
