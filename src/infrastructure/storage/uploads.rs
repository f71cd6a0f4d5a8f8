//! Local file storage for the media library.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::config::MediaConfig;
use crate::shared::InfraError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredUpload {
    /// `<uuid>-<original name>`
    pub file_name: String,
    pub file_url: String,
    pub path: PathBuf,
}

#[derive(Debug, Clone)]
pub struct LocalUploadStorage {
    root: PathBuf,
    public_prefix: String,
}

impl LocalUploadStorage {
    pub fn new(root: impl Into<PathBuf>, public_prefix: impl Into<String>) -> Self {
        let prefix = public_prefix.into();
        Self {
            root: root.into(),
            public_prefix: prefix.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(cfg: &MediaConfig) -> Self {
        Self::new(cfg.upload_dir.clone(), cfg.public_prefix.clone())
    }

    pub async fn store(&self, original_name: &str, bytes: &[u8]) -> Result<StoredUpload, InfraError> {
        tokio::fs::create_dir_all(&self.root).await?;

        let file_name = format!("{}-{}", uuid::Uuid::new_v4(), sanitize_file_name(original_name));
        let path = self.root.join(&file_name);
        tokio::fs::write(&path, bytes).await?;
        debug!(path = %path.display(), size = bytes.len(), "stored upload");

        Ok(StoredUpload {
            file_url: format!("{}/{}", self.public_prefix, file_name),
            file_name,
            path,
        })
    }

    /// Removes the file behind `file_url`. A missing file is logged and
    /// reported as `Ok(false)`.
    pub async fn remove(&self, file_url: &str) -> Result<bool, InfraError> {
        let Some(path) = self.path_for_url(file_url) else {
            warn!(file_url, "media url outside the upload directory, nothing removed");
            return Ok(false);
        };
        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                debug!(path = %path.display(), "removed upload");
                Ok(true)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!(path = %path.display(), "media file does not exist");
                Ok(false)
            }
            Err(e) => Err(e.into()),
        }
    }

    fn path_for_url(&self, file_url: &str) -> Option<PathBuf> {
        let name = file_url
            .strip_prefix(&self.public_prefix)?
            .trim_start_matches('/');
        if name.is_empty() || name.contains('/') || name.contains('\\') || name == ".." {
            return None;
        }
        Some(self.root.join(name))
    }
}

/// Last path component with anything outside `[A-Za-z0-9._-]` replaced.
fn sanitize_file_name(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let cleaned = cleaned.trim_start_matches('.');
    if cleaned.is_empty() {
        "upload".to_string()
    } else {
        cleaned.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitizes_names() {
        assert_eq!(sanitize_file_name("pool.jpg"), "pool.jpg");
        assert_eq!(sanitize_file_name("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_file_name("C:\\img\\lobby view.png"), "lobby_view.png");
        assert_eq!(sanitize_file_name(".."), "upload");
    }

    #[tokio::test]
    async fn store_and_remove() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalUploadStorage::new(dir.path(), "/uploads/");

        let stored = storage.store("lobby.png", b"png-bytes").await.unwrap();
        assert!(stored.file_name.ends_with("-lobby.png"));
        assert_eq!(stored.file_url, format!("/uploads/{}", stored.file_name));
        assert_eq!(tokio::fs::read(&stored.path).await.unwrap(), b"png-bytes");

        assert!(storage.remove(&stored.file_url).await.unwrap());
        assert!(!stored.path.exists());
        // second delete: file already gone
        assert!(!storage.remove(&stored.file_url).await.unwrap());
    }

    #[tokio::test]
    async fn foreign_urls_are_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalUploadStorage::new(dir.path(), "/uploads");
        assert!(!storage.remove("/elsewhere/x.png").await.unwrap());
        assert!(!storage.remove("/uploads/../secret").await.unwrap());
    }
}
