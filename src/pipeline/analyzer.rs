// src/pipeline/analyzer.rs
use std::path::{Path, PathBuf};

use crate::document::DocumentBuilder;
use crate::pipeline::secretary::MeetingSecretary;
use crate::storage::StorageManager;
use crate::utils::AppError;

/// End-to-end run: transcript in, persisted meeting note out.
pub struct MeetingAnalyzer {
    secretary: MeetingSecretary,
    storage: StorageManager,
}

impl MeetingAnalyzer {
    pub fn new(secretary: MeetingSecretary, storage: StorageManager) -> Self {
        Self { secretary, storage }
    }

    pub fn output_path(&self) -> &Path {
        self.storage.output_path()
    }

    pub fn storage(&self) -> &StorageManager {
        &self.storage
    }

    /// Generates every section, renders the document and replaces the
    /// artifact. Nothing is written unless all generation calls succeed.
    pub async fn complete(&self, transcript: &str) -> Result<PathBuf, AppError> {
        let content = self.secretary.process(transcript).await?;

        let doc = DocumentBuilder::build(content.markup());
        tracing::info!(
            "Rendered {} sections {:?} into {} blocks",
            content.len(),
            content.titles().collect::<Vec<_>>(),
            doc.blocks().len()
        );

        Ok(self.storage.save_document(&doc)?)
    }
}
