// src/document/mod.rs
pub mod builder;
pub mod docx;
pub mod model;

#[cfg(test)]
pub(crate) mod testing;

// Re-export key document types for convenience
#[allow(unused_imports)]
pub use builder::DocumentBuilder;
#[allow(unused_imports)]
pub use docx::{write_docx, DOCX_MEDIA_TYPE};
#[allow(unused_imports)]
pub use model::{Block, RenderedDocument, StyleDef, StyleRegistry, Table};
