use async_trait::async_trait;

use super::model::Room;
use crate::shared::DomainResult;

#[async_trait]
pub trait RoomRepository: Send + Sync {
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Room>>;
    async fn find_by_number(&self, room_number: &str) -> DomainResult<Option<Room>>;
    async fn save(&self, room: Room) -> DomainResult<Room>;
    async fn update(&self, room: Room) -> DomainResult<Room>;
    async fn delete(&self, id: &str) -> DomainResult<()>;
}
