use async_trait::async_trait;

use super::model::RoomClass;
use crate::shared::DomainResult;

/// Persists the class together with its feature and bed-type links.
#[async_trait]
pub trait RoomClassRepository: Send + Sync {
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<RoomClass>>;
    async fn find_by_slug(&self, slug: &str) -> DomainResult<Option<RoomClass>>;
    async fn save(&self, room_class: RoomClass) -> DomainResult<RoomClass>;
    async fn update(&self, room_class: RoomClass) -> DomainResult<RoomClass>;
    async fn delete(&self, id: &str) -> DomainResult<()>;
}
