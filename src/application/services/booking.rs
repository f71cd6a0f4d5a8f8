use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use crate::application::access::require_principal;
use crate::application::lister::Lister;
use crate::domain::booking::{Booking, BookingDraft};
use crate::domain::catalog::CatalogKind;
use crate::domain::{AccessGuard, DomainError, DomainResult, RepositoryProvider};
use crate::shared::PageResult;

pub struct BookingService {
    repos: Arc<dyn RepositoryProvider>,
    lister: Lister<Booking>,
}

impl BookingService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, lister: Lister<Booking>) -> Self {
        Self { repos, lister }
    }

    /// Matches room number or guest name.
    pub async fn list(
        &self,
        guard: &dyn AccessGuard,
        query: &str,
        page: u32,
    ) -> DomainResult<PageResult<Booking>> {
        self.lister.list(guard, &self.lister.request(query, page)).await
    }

    pub async fn options(&self, guard: &dyn AccessGuard) -> DomainResult<Vec<Booking>> {
        self.lister.options(guard).await
    }

    pub async fn get(&self, guard: &dyn AccessGuard, id: &str) -> DomainResult<Booking> {
        require_principal(guard).await?;
        self.find(id).await
    }

    pub async fn create(
        &self,
        guard: &dyn AccessGuard,
        draft: BookingDraft,
    ) -> DomainResult<Booking> {
        let principal = require_principal(guard).await?;
        let now = Utc::now();
        draft.validate(now.date_naive())?;
        self.ensure_references(&draft).await?;

        let saved = self
            .repos
            .bookings()
            .save(Booking::new(draft, &principal.email, now))
            .await?;
        info!(
            id = %saved.id,
            room_id = %saved.room_id,
            check_in = %saved.check_in,
            nights = saved.nights(),
            "booking created"
        );
        Ok(saved)
    }

    pub async fn update(
        &self,
        guard: &dyn AccessGuard,
        id: &str,
        draft: BookingDraft,
    ) -> DomainResult<Booking> {
        let principal = require_principal(guard).await?;
        let now = Utc::now();
        draft.validate(now.date_naive())?;
        let mut booking = self.find(id).await?;
        self.ensure_references(&draft).await?;

        booking.apply(draft, &principal.email, now);
        let saved = self.repos.bookings().update(booking).await?;
        info!(id = %saved.id, "booking updated");
        Ok(saved)
    }

    pub async fn delete(&self, guard: &dyn AccessGuard, id: &str) -> DomainResult<()> {
        require_principal(guard).await?;
        self.find(id).await?;
        self.repos.bookings().delete(id).await?;
        info!(id, "booking deleted");
        Ok(())
    }

    async fn find(&self, id: &str) -> DomainResult<Booking> {
        self.repos
            .bookings()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Booking", id))
    }

    async fn ensure_references(&self, draft: &BookingDraft) -> DomainResult<()> {
        if self.repos.users().find_by_id(&draft.guest_id).await?.is_none() {
            return Err(DomainError::Validation("Unknown guest".into()));
        }
        if self.repos.rooms().find_by_id(&draft.room_id).await?.is_none() {
            return Err(DomainError::Validation("Unknown room".into()));
        }
        if self
            .repos
            .catalog()
            .find_by_id(CatalogKind::PaymentStatus, &draft.payment_status_id)
            .await?
            .is_none()
        {
            return Err(DomainError::Validation("Unknown payment status".into()));
        }
        Ok(())
    }
}
