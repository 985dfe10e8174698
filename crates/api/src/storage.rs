//! Attachment file storage on the local filesystem.
//!
//! Files land under the configured upload directory with a
//! UUID-prefixed name; only the relative path is persisted in the
//! database. The store is a narrow collaborator: the rest of the
//! system only ever sees opaque paths.

use std::path::{Path, PathBuf};

use uuid::Uuid;

/// File store rooted at the upload directory.
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Create the upload directory if it does not exist.
    pub async fn ensure_root(&self) -> std::io::Result<()> {
        tokio::fs::create_dir_all(&self.root).await
    }

    /// Write `bytes` under a fresh UUID-prefixed name derived from the
    /// original file name. Returns the path relative to the root.
    pub async fn store(&self, original_name: &str, bytes: &[u8]) -> std::io::Result<String> {
        let relative = format!("{}-{}", Uuid::new_v4(), sanitize_file_name(original_name));
        tokio::fs::write(self.root.join(&relative), bytes).await?;
        Ok(relative)
    }

    /// Read a previously stored file back.
    pub async fn read(&self, relative: &str) -> std::io::Result<Vec<u8>> {
        tokio::fs::read(self.absolute(relative)).await
    }

    fn absolute(&self, relative: &str) -> PathBuf {
        // Strip any path components so a stored path can never escape
        // the root.
        let name = Path::new(relative)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.root.join(name)
    }
}

/// Keep only a safe subset of characters from a client-supplied name.
fn sanitize_file_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if cleaned.is_empty() {
        "file".to_string()
    } else {
        cleaned
    }
}
