use async_trait::async_trait;

use super::model::Media;
use crate::shared::DomainResult;

#[async_trait]
pub trait MediaRepository: Send + Sync {
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Media>>;
    async fn save(&self, media: Media) -> DomainResult<Media>;
    async fn update(&self, media: Media) -> DomainResult<Media>;
    async fn delete(&self, id: &str) -> DomainResult<()>;
    /// Closest item created before `media`.
    async fn find_older(&self, media: &Media) -> DomainResult<Option<Media>>;
    /// Closest item created after `media`.
    async fn find_newer(&self, media: &Media) -> DomainResult<Option<Media>>;
}
