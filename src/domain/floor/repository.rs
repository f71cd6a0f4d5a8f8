use async_trait::async_trait;

use super::model::Floor;
use crate::shared::DomainResult;

#[async_trait]
pub trait FloorRepository: Send + Sync {
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Floor>>;
    async fn find_by_number(&self, floor_number: i32) -> DomainResult<Option<Floor>>;
    async fn save(&self, floor: Floor) -> DomainResult<Floor>;
    async fn update(&self, floor: Floor) -> DomainResult<Floor>;
    async fn delete(&self, id: &str) -> DomainResult<()>;
}
