use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use crate::application::access::require_principal;
use crate::application::lister::Lister;
use crate::domain::catalog::CatalogKind;
use crate::domain::room::{Room, RoomDraft};
use crate::domain::{AccessGuard, DomainError, DomainResult, RepositoryProvider};
use crate::shared::PageResult;

pub struct RoomService {
    repos: Arc<dyn RepositoryProvider>,
    lister: Lister<Room>,
}

impl RoomService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, lister: Lister<Room>) -> Self {
        Self { repos, lister }
    }

    /// Matches room number, room class name or room status name.
    pub async fn list(
        &self,
        guard: &dyn AccessGuard,
        query: &str,
        page: u32,
    ) -> DomainResult<PageResult<Room>> {
        self.lister.list(guard, &self.lister.request(query, page)).await
    }

    pub async fn options(&self, guard: &dyn AccessGuard) -> DomainResult<Vec<Room>> {
        self.lister.options(guard).await
    }

    pub async fn get(&self, guard: &dyn AccessGuard, id: &str) -> DomainResult<Room> {
        require_principal(guard).await?;
        self.find(id).await
    }

    pub async fn create(&self, guard: &dyn AccessGuard, draft: RoomDraft) -> DomainResult<Room> {
        let principal = require_principal(guard).await?;
        draft.validate()?;
        self.ensure_references(&draft).await?;
        self.ensure_number_free(draft.room_number.trim(), None).await?;

        let saved = self
            .repos
            .rooms()
            .save(Room::new(draft, &principal.email, Utc::now()))
            .await?;
        info!(id = %saved.id, room_number = %saved.room_number, "room created");
        Ok(saved)
    }

    pub async fn update(
        &self,
        guard: &dyn AccessGuard,
        id: &str,
        draft: RoomDraft,
    ) -> DomainResult<Room> {
        let principal = require_principal(guard).await?;
        draft.validate()?;
        let mut room = self.find(id).await?;
        self.ensure_references(&draft).await?;
        self.ensure_number_free(draft.room_number.trim(), Some(id)).await?;

        room.apply(draft, &principal.email, Utc::now());
        let saved = self.repos.rooms().update(room).await?;
        info!(id = %saved.id, "room updated");
        Ok(saved)
    }

    /// Drag-and-drop reordering of the room's images.
    pub async fn reorder_images(
        &self,
        guard: &dyn AccessGuard,
        id: &str,
        from: usize,
        to: usize,
    ) -> DomainResult<Room> {
        let principal = require_principal(guard).await?;
        let mut room = self.find(id).await?;
        room.reorder_images(from, to)?;
        room.audit.touch(&principal.email, Utc::now());
        self.repos.rooms().update(room).await
    }

    pub async fn delete(&self, guard: &dyn AccessGuard, id: &str) -> DomainResult<()> {
        require_principal(guard).await?;
        self.find(id).await?;
        self.repos.rooms().delete(id).await?;
        info!(id, "room deleted");
        Ok(())
    }

    async fn find(&self, id: &str) -> DomainResult<Room> {
        self.repos
            .rooms()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Room", id))
    }

    async fn ensure_references(&self, draft: &RoomDraft) -> DomainResult<()> {
        if self
            .repos
            .room_classes()
            .find_by_id(&draft.room_class_id)
            .await?
            .is_none()
        {
            return Err(DomainError::Validation("Unknown room class".into()));
        }
        if self.repos.floors().find_by_id(&draft.floor_id).await?.is_none() {
            return Err(DomainError::Validation("Unknown floor".into()));
        }
        if self
            .repos
            .catalog()
            .find_by_id(CatalogKind::RoomStatus, &draft.room_status_id)
            .await?
            .is_none()
        {
            return Err(DomainError::Validation("Unknown room status".into()));
        }
        Ok(())
    }

    async fn ensure_number_free(&self, number: &str, except_id: Option<&str>) -> DomainResult<()> {
        match self.repos.rooms().find_by_number(number).await? {
            Some(existing) if Some(existing.id.as_str()) != except_id => {
                Err(DomainError::Conflict("Room already exists".into()))
            }
            _ => Ok(()),
        }
    }
}
