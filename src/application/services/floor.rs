use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use crate::application::access::require_principal;
use crate::application::lister::Lister;
use crate::domain::floor::{Floor, FloorDraft};
use crate::domain::{AccessGuard, DomainError, DomainResult, RepositoryProvider};
use crate::shared::PageResult;

pub struct FloorService {
    repos: Arc<dyn RepositoryProvider>,
    lister: Lister<Floor>,
}

impl FloorService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, lister: Lister<Floor>) -> Self {
        Self { repos, lister }
    }

    pub async fn list(
        &self,
        guard: &dyn AccessGuard,
        query: &str,
        page: u32,
    ) -> DomainResult<PageResult<Floor>> {
        self.lister.list(guard, &self.lister.request(query, page)).await
    }

    /// All floors by number ascending.
    pub async fn options(&self, guard: &dyn AccessGuard) -> DomainResult<Vec<Floor>> {
        self.lister.options(guard).await
    }

    pub async fn get(&self, guard: &dyn AccessGuard, id: &str) -> DomainResult<Floor> {
        require_principal(guard).await?;
        self.find(id).await
    }

    pub async fn create(&self, guard: &dyn AccessGuard, draft: FloorDraft) -> DomainResult<Floor> {
        let principal = require_principal(guard).await?;
        self.ensure_number_free(draft.floor_number, None).await?;

        let saved = self
            .repos
            .floors()
            .save(Floor::new(draft, &principal.email, Utc::now()))
            .await?;
        info!(id = %saved.id, floor_number = saved.floor_number, "floor created");
        Ok(saved)
    }

    /// Re-saving a floor with its own number is fine; taking another
    /// floor's number is a conflict.
    pub async fn update(
        &self,
        guard: &dyn AccessGuard,
        id: &str,
        draft: FloorDraft,
    ) -> DomainResult<Floor> {
        let principal = require_principal(guard).await?;
        let mut floor = self.find(id).await?;
        self.ensure_number_free(draft.floor_number, Some(id)).await?;

        floor.apply(draft, &principal.email, Utc::now());
        let saved = self.repos.floors().update(floor).await?;
        info!(id = %saved.id, floor_number = saved.floor_number, "floor updated");
        Ok(saved)
    }

    pub async fn delete(&self, guard: &dyn AccessGuard, id: &str) -> DomainResult<()> {
        require_principal(guard).await?;
        self.find(id).await?;
        self.repos.floors().delete(id).await?;
        info!(id, "floor deleted");
        Ok(())
    }

    async fn find(&self, id: &str) -> DomainResult<Floor> {
        self.repos
            .floors()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Floor", id))
    }

    async fn ensure_number_free(&self, number: i32, except_id: Option<&str>) -> DomainResult<()> {
        match self.repos.floors().find_by_number(number).await? {
            Some(existing) if Some(existing.id.as_str()) != except_id => {
                Err(DomainError::Conflict("Floor already exists".into()))
            }
            _ => Ok(()),
        }
    }
}
