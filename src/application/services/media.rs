//! Media library: uploads, metadata, deletion and browsing.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use crate::application::access::require_principal;
use crate::application::lister::Lister;
use crate::domain::media::{Media, MediaMetadata};
use crate::domain::{AccessGuard, DomainError, DomainResult, RepositoryProvider};
use crate::infrastructure::storage::LocalUploadStorage;
use crate::shared::PageResult;

/// A file received from the client.
#[derive(Debug, Clone)]
pub struct Upload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

pub struct MediaService {
    repos: Arc<dyn RepositoryProvider>,
    lister: Lister<Media>,
    storage: LocalUploadStorage,
}

impl MediaService {
    pub fn new(
        repos: Arc<dyn RepositoryProvider>,
        lister: Lister<Media>,
        storage: LocalUploadStorage,
    ) -> Self {
        Self {
            repos,
            lister,
            storage,
        }
    }

    /// Matches file name or alt text.
    pub async fn list(
        &self,
        guard: &dyn AccessGuard,
        query: &str,
        page: u32,
    ) -> DomainResult<PageResult<Media>> {
        self.lister.list(guard, &self.lister.request(query, page)).await
    }

    pub async fn options(&self, guard: &dyn AccessGuard) -> DomainResult<Vec<Media>> {
        self.lister.options(guard).await
    }

    pub async fn get(&self, guard: &dyn AccessGuard, id: &str) -> DomainResult<Media> {
        require_principal(guard).await?;
        self.find(id).await
    }

    /// Writes the file, then records it. The file is removed again if the
    /// record cannot be saved.
    pub async fn upload(&self, guard: &dyn AccessGuard, upload: Upload) -> DomainResult<Media> {
        let principal = require_principal(guard).await?;
        if upload.bytes.is_empty() {
            return Err(DomainError::Validation("No file uploaded".into()));
        }

        let stored = self.storage.store(&upload.file_name, &upload.bytes).await?;
        let media = Media::new(
            stored.file_url.clone(),
            stored.file_name.clone(),
            upload.content_type,
            &principal.email,
            Utc::now(),
        );

        match self.repos.media().save(media).await {
            Ok(saved) => {
                info!(id = %saved.id, file = %saved.file_name, "media uploaded");
                Ok(saved)
            }
            Err(e) => {
                if let Err(cleanup) = self.storage.remove(&stored.file_url).await {
                    warn!(error = %cleanup, file = %stored.file_name, "failed to remove orphaned upload");
                }
                Err(e)
            }
        }
    }

    pub async fn update_metadata(
        &self,
        guard: &dyn AccessGuard,
        id: &str,
        metadata: MediaMetadata,
    ) -> DomainResult<Media> {
        let principal = require_principal(guard).await?;
        let mut media = self.find(id).await?;
        if metadata.is_empty() {
            return Ok(media);
        }
        media.apply(metadata, &principal.email, Utc::now());
        self.repos.media().update(media).await
    }

    /// Removes the record, then the file. A missing file only logs a warning.
    pub async fn delete(&self, guard: &dyn AccessGuard, id: &str) -> DomainResult<()> {
        require_principal(guard).await?;
        let media = self.find(id).await?;
        self.repos.media().delete(id).await?;

        match self.storage.remove(&media.file_url).await {
            Ok(true) => info!(id, file = %media.file_name, "media deleted"),
            Ok(false) => info!(id, "media record deleted without a file"),
            Err(e) => warn!(id, error = %e, "media record deleted but file removal failed"),
        }
        Ok(())
    }

    /// Next older item, for the media viewer's "next" button.
    pub async fn next(&self, guard: &dyn AccessGuard, id: &str) -> DomainResult<Option<Media>> {
        require_principal(guard).await?;
        let media = self.find(id).await?;
        self.repos.media().find_older(&media).await
    }

    /// Next newer item.
    pub async fn previous(
        &self,
        guard: &dyn AccessGuard,
        id: &str,
    ) -> DomainResult<Option<Media>> {
        require_principal(guard).await?;
        let media = self.find(id).await?;
        self.repos.media().find_newer(&media).await
    }

    async fn find(&self, id: &str) -> DomainResult<Media> {
        self.repos
            .media()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Media", id))
    }
}
