//! Bed types, features, payment statuses and room statuses.
//!
//! One service instance per `CatalogKind`.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use crate::application::access::require_principal;
use crate::application::lister::Lister;
use crate::domain::catalog::{CatalogDraft, CatalogEntry, CatalogKind};
use crate::domain::{AccessGuard, DomainError, DomainResult, RepositoryProvider};
use crate::shared::PageResult;

pub struct CatalogService {
    kind: CatalogKind,
    repos: Arc<dyn RepositoryProvider>,
    lister: Lister<CatalogEntry>,
}

impl CatalogService {
    pub fn new(
        kind: CatalogKind,
        repos: Arc<dyn RepositoryProvider>,
        lister: Lister<CatalogEntry>,
    ) -> Self {
        Self { kind, repos, lister }
    }

    pub fn kind(&self) -> CatalogKind {
        self.kind
    }

    pub async fn list(
        &self,
        guard: &dyn AccessGuard,
        query: &str,
        page: u32,
    ) -> DomainResult<PageResult<CatalogEntry>> {
        self.lister.list(guard, &self.lister.request(query, page)).await
    }

    pub async fn options(&self, guard: &dyn AccessGuard) -> DomainResult<Vec<CatalogEntry>> {
        self.lister.options(guard).await
    }

    pub async fn get(&self, guard: &dyn AccessGuard, id: &str) -> DomainResult<CatalogEntry> {
        require_principal(guard).await?;
        self.find(id).await
    }

    pub async fn create(
        &self,
        guard: &dyn AccessGuard,
        draft: CatalogDraft,
    ) -> DomainResult<CatalogEntry> {
        let principal = require_principal(guard).await?;
        draft.validate(self.kind)?;

        let entry = CatalogEntry::new(self.kind, draft, &principal.email, Utc::now());
        self.ensure_slug_free(&entry.slug, None).await?;

        let saved = self.repos.catalog().save(entry).await?;
        info!(kind = self.kind.as_str(), id = %saved.id, slug = %saved.slug, "catalog entry created");
        Ok(saved)
    }

    pub async fn update(
        &self,
        guard: &dyn AccessGuard,
        id: &str,
        draft: CatalogDraft,
    ) -> DomainResult<CatalogEntry> {
        let principal = require_principal(guard).await?;
        draft.validate(self.kind)?;

        let mut entry = self.find(id).await?;
        entry.apply(draft, &principal.email, Utc::now());
        self.ensure_slug_free(&entry.slug, Some(id)).await?;

        let saved = self.repos.catalog().update(entry).await?;
        info!(kind = self.kind.as_str(), id = %saved.id, "catalog entry updated");
        Ok(saved)
    }

    pub async fn delete(&self, guard: &dyn AccessGuard, id: &str) -> DomainResult<()> {
        require_principal(guard).await?;
        self.find(id).await?;
        self.repos.catalog().delete(self.kind, id).await?;
        info!(kind = self.kind.as_str(), id, "catalog entry deleted");
        Ok(())
    }

    async fn find(&self, id: &str) -> DomainResult<CatalogEntry> {
        self.repos
            .catalog()
            .find_by_id(self.kind, id)
            .await?
            .ok_or_else(|| DomainError::not_found(self.kind.display_name(), id))
    }

    async fn ensure_slug_free(&self, slug: &str, except_id: Option<&str>) -> DomainResult<()> {
        match self.repos.catalog().find_by_slug(self.kind, slug).await? {
            Some(existing) if Some(existing.id.as_str()) != except_id => Err(
                DomainError::Conflict(format!("{} already exists", self.kind.display_name())),
            ),
            _ => Ok(()),
        }
    }
}
