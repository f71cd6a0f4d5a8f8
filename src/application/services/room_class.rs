use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use crate::application::access::require_principal;
use crate::application::lister::Lister;
use crate::domain::catalog::CatalogKind;
use crate::domain::room_class::{RoomClass, RoomClassDraft};
use crate::domain::{AccessGuard, DomainError, DomainResult, RepositoryProvider};
use crate::shared::PageResult;

pub struct RoomClassService {
    repos: Arc<dyn RepositoryProvider>,
    lister: Lister<RoomClass>,
}

impl RoomClassService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, lister: Lister<RoomClass>) -> Self {
        Self { repos, lister }
    }

    pub async fn list(
        &self,
        guard: &dyn AccessGuard,
        query: &str,
        page: u32,
    ) -> DomainResult<PageResult<RoomClass>> {
        self.lister.list(guard, &self.lister.request(query, page)).await
    }

    pub async fn options(&self, guard: &dyn AccessGuard) -> DomainResult<Vec<RoomClass>> {
        self.lister.options(guard).await
    }

    pub async fn get(&self, guard: &dyn AccessGuard, id: &str) -> DomainResult<RoomClass> {
        require_principal(guard).await?;
        self.find(id).await
    }

    pub async fn create(
        &self,
        guard: &dyn AccessGuard,
        draft: RoomClassDraft,
    ) -> DomainResult<RoomClass> {
        let principal = require_principal(guard).await?;
        draft.validate()?;
        self.ensure_references(&draft).await?;

        let room_class = RoomClass::new(draft, &principal.email, Utc::now());
        self.ensure_slug_free(&room_class.slug, None).await?;

        let saved = self.repos.room_classes().save(room_class).await?;
        info!(id = %saved.id, slug = %saved.slug, "room class created");
        Ok(saved)
    }

    pub async fn update(
        &self,
        guard: &dyn AccessGuard,
        id: &str,
        draft: RoomClassDraft,
    ) -> DomainResult<RoomClass> {
        let principal = require_principal(guard).await?;
        draft.validate()?;
        self.ensure_references(&draft).await?;

        let mut room_class = self.find(id).await?;
        room_class.apply(draft, &principal.email, Utc::now());
        self.ensure_slug_free(&room_class.slug, Some(id)).await?;

        let saved = self.repos.room_classes().update(room_class).await?;
        info!(id = %saved.id, "room class updated");
        Ok(saved)
    }

    pub async fn delete(&self, guard: &dyn AccessGuard, id: &str) -> DomainResult<()> {
        require_principal(guard).await?;
        self.find(id).await?;
        self.repos.room_classes().delete(id).await?;
        info!(id, "room class deleted");
        Ok(())
    }

    async fn find(&self, id: &str) -> DomainResult<RoomClass> {
        self.repos
            .room_classes()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Room class", id))
    }

    /// Every linked feature and bed type must exist in the catalog.
    async fn ensure_references(&self, draft: &RoomClassDraft) -> DomainResult<()> {
        let catalog = self.repos.catalog();
        for feature_id in draft.features.iter().map(|f| f.trim()).filter(|f| !f.is_empty()) {
            if catalog.find_by_id(CatalogKind::Feature, feature_id).await?.is_none() {
                return Err(DomainError::Validation(format!(
                    "Unknown feature: {}",
                    feature_id
                )));
            }
        }
        for line in &draft.bed_types {
            if catalog
                .find_by_id(CatalogKind::BedType, &line.bed_type_id)
                .await?
                .is_none()
            {
                return Err(DomainError::Validation(format!(
                    "Unknown bed type: {}",
                    line.bed_type_id
                )));
            }
        }
        Ok(())
    }

    async fn ensure_slug_free(&self, slug: &str, except_id: Option<&str>) -> DomainResult<()> {
        match self.repos.room_classes().find_by_slug(slug).await? {
            Some(existing) if Some(existing.id.as_str()) != except_id => {
                Err(DomainError::Conflict("Room class already exists".into()))
            }
            _ => Ok(()),
        }
    }
}
