use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use crate::application::access::require_principal;
use crate::application::lister::Lister;
use crate::domain::addon::{Addon, AddonDraft};
use crate::domain::{AccessGuard, DomainError, DomainResult, RepositoryProvider};
use crate::shared::PageResult;

pub struct AddonService {
    repos: Arc<dyn RepositoryProvider>,
    lister: Lister<Addon>,
}

impl AddonService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, lister: Lister<Addon>) -> Self {
        Self { repos, lister }
    }

    pub async fn list(
        &self,
        guard: &dyn AccessGuard,
        query: &str,
        page: u32,
    ) -> DomainResult<PageResult<Addon>> {
        self.lister.list(guard, &self.lister.request(query, page)).await
    }

    pub async fn options(&self, guard: &dyn AccessGuard) -> DomainResult<Vec<Addon>> {
        self.lister.options(guard).await
    }

    pub async fn get(&self, guard: &dyn AccessGuard, id: &str) -> DomainResult<Addon> {
        require_principal(guard).await?;
        self.find(id).await
    }

    pub async fn create(&self, guard: &dyn AccessGuard, draft: AddonDraft) -> DomainResult<Addon> {
        let principal = require_principal(guard).await?;
        draft.validate()?;

        let addon = Addon::new(draft, &principal.email, Utc::now());
        self.ensure_slug_free(&addon.slug, None).await?;

        let saved = self.repos.addons().save(addon).await?;
        info!(id = %saved.id, slug = %saved.slug, "add-on created");
        Ok(saved)
    }

    pub async fn update(
        &self,
        guard: &dyn AccessGuard,
        id: &str,
        draft: AddonDraft,
    ) -> DomainResult<Addon> {
        let principal = require_principal(guard).await?;
        draft.validate()?;

        let mut addon = self.find(id).await?;
        addon.apply(draft, &principal.email, Utc::now());
        self.ensure_slug_free(&addon.slug, Some(id)).await?;

        let saved = self.repos.addons().update(addon).await?;
        info!(id = %saved.id, "add-on updated");
        Ok(saved)
    }

    pub async fn delete(&self, guard: &dyn AccessGuard, id: &str) -> DomainResult<()> {
        require_principal(guard).await?;
        self.find(id).await?;
        self.repos.addons().delete(id).await?;
        info!(id, "add-on deleted");
        Ok(())
    }

    async fn find(&self, id: &str) -> DomainResult<Addon> {
        self.repos
            .addons()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Add-on", id))
    }

    async fn ensure_slug_free(&self, slug: &str, except_id: Option<&str>) -> DomainResult<()> {
        match self.repos.addons().find_by_slug(slug).await? {
            Some(existing) if Some(existing.id.as_str()) != except_id => {
                Err(DomainError::Conflict("Add-on already exists".into()))
            }
            _ => Ok(()),
        }
    }
}
