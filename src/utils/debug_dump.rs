// src/utils/debug_dump.rs
use std::fs;
use std::path::{Path, PathBuf};

/// Saves raw model output for offline inspection when `--debug` is set.
///
/// Every write is best effort: a failure is logged and otherwise ignored so a
/// debug dump can never fail a run.
#[derive(Debug, Clone)]
pub struct DebugDump {
    dir: PathBuf,
    run_stamp: String,
}

impl DebugDump {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            run_stamp: chrono::Utc::now().format("%Y%m%dT%H%M%S").to_string(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Writes `content` to `<dir>/<run_stamp>_<name>` and returns the path on success.
    pub fn save(&self, name: &str, content: &str) -> Option<PathBuf> {
        if let Err(e) = fs::create_dir_all(&self.dir) {
            tracing::warn!("Failed to create debug directory {}: {}", self.dir.display(), e);
            return None;
        }

        let path = self.dir.join(format!("{}_{}", self.run_stamp, sanitize(name)));
        match fs::write(&path, content) {
            Ok(()) => {
                tracing::debug!("Saved debug file: {}", path.display());
                Some(path)
            }
            Err(e) => {
                tracing::warn!("Failed to save debug file {}: {}", path.display(), e);
                None
            }
        }
    }
}

// Section titles contain spaces, dots and colons; keep file names portable.
fn sanitize(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_alphanumeric() || c == '-' || c == '.' { c } else { '_' })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_writes_sanitized_file() {
        let tmp = tempfile::tempdir().unwrap();
        let dump = DebugDump::new(tmp.path().join("debug"));

        let path = dump.save("section_2. Key points:.md", "raw text").unwrap();
        let file_name = path.file_name().unwrap().to_string_lossy().to_string();

        assert!(file_name.ends_with("section_2._Key_points_.md"), "got {}", file_name);
        assert_eq!(fs::read_to_string(path).unwrap(), "raw text");
    }

    #[test]
    fn test_unwritable_dir_is_not_fatal() {
        let tmp = tempfile::tempdir().unwrap();
        let blocker = tmp.path().join("file");
        fs::write(&blocker, "x").unwrap();

        // A regular file where the directory should be.
        let dump = DebugDump::new(&blocker);
        assert!(dump.save("outline.json", "{}").is_none());
    }
}
