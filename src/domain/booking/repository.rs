use async_trait::async_trait;

use super::model::Booking;
use crate::shared::DomainResult;

/// Persists the booking together with its add-on lines.
#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Booking>>;
    async fn save(&self, booking: Booking) -> DomainResult<Booking>;
    async fn update(&self, booking: Booking) -> DomainResult<Booking>;
    async fn delete(&self, id: &str) -> DomainResult<()>;
}
