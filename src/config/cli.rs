use crate::core::Storage;
use crate::utils::error::{GreenCodeError, Result};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Filesystem-backed storage.
#[derive(Debug, Clone, Default)]
pub struct LocalStorage;

impl LocalStorage {
    pub fn new() -> Self {
        Self
    }
}

impl Storage for LocalStorage {
    async fn read_text(&self, path: &Path) -> Result<String> {
        fs::read_to_string(path).map_err(|source| match source.kind() {
            ErrorKind::NotFound => GreenCodeError::FileNotFound {
                path: path.to_path_buf(),
            },
            _ => GreenCodeError::ReadError {
                path: path.to_path_buf(),
                source,
            },
        })
    }

    /// Replaces `path` atomically: the text lands in a sibling temp file that
    /// is renamed over the destination once fully written.
    async fn write_text(&self, path: &Path, contents: &str) -> Result<()> {
        let write_error = |source| GreenCodeError::WriteError {
            path: path.to_path_buf(),
            source,
        };

        let parent = match path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };

        let mut temp = NamedTempFile::new_in(parent).map_err(write_error)?;
        temp.write_all(contents.as_bytes()).map_err(write_error)?;
        temp.as_file().sync_all().map_err(write_error)?;

        // Keep the mode of a file we are overwriting (e.g. an executable script)
        if let Ok(existing) = fs::metadata(path) {
            temp.as_file()
                .set_permissions(existing.permissions())
                .map_err(write_error)?;
        }

        temp.persist(path).map_err(|e| write_error(e.error))?;
        Ok(())
    }
}
