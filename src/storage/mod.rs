// src/storage/mod.rs
use std::fs;
use std::path::{Path, PathBuf};

use crate::document::{write_docx, RenderedDocument};
use crate::utils::error::StorageError;

/// Owns the single output artifact a run produces.
#[derive(Debug, Clone)]
pub struct StorageManager {
    output_path: PathBuf,
}

impl StorageManager {
    /// Creates a StorageManager for `output_path`, creating its parent directory if needed.
    pub fn new<P: AsRef<Path>>(output_path: P) -> Result<Self, StorageError> {
        let output_path = output_path.as_ref().to_path_buf();
        if output_path.file_name().is_none() {
            return Err(StorageError::InvalidPath(output_path.display().to_string()));
        }

        if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            if !parent.exists() {
                fs::create_dir_all(parent).map_err(StorageError::IoError)?;
            }
        }

        Ok(Self { output_path })
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    pub fn exists(&self) -> bool {
        self.output_path.is_file()
    }

    /// Writes the document, replacing any previous artifact.
    ///
    /// The archive is packed into a sibling temp file and renamed over the
    /// target, so the output path never holds a half-written document.
    pub fn save_document(&self, doc: &RenderedDocument) -> Result<PathBuf, StorageError> {
        let tmp_path = self.temp_path();

        let result = fs::File::create(&tmp_path)
            .map_err(StorageError::IoError)
            .and_then(|file| write_docx(doc, file).map_err(StorageError::from))
            .and_then(|()| fs::rename(&tmp_path, &self.output_path).map_err(StorageError::IoError));

        if let Err(e) = result {
            tracing::error!("Failed to save document to {}: {}", self.output_path.display(), e);
            let _ = fs::remove_file(&tmp_path);
            return Err(e);
        }

        tracing::info!(
            "Saved meeting note ({} blocks) to {}",
            doc.blocks().len(),
            self.output_path.display()
        );
        Ok(self.output_path.clone())
    }

    /// Removes the artifact. Returns `false` if there was nothing to delete.
    pub fn delete(&self) -> Result<bool, StorageError> {
        match fs::remove_file(&self.output_path) {
            Ok(()) => {
                tracing::info!("Deleted {}", self.output_path.display());
                Ok(true)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(StorageError::IoError(e)),
        }
    }

    fn temp_path(&self) -> PathBuf {
        let file_name = self
            .output_path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        self.output_path
            .with_file_name(format!(".{}.{}.partial", file_name, std::process::id()))
    }
}
