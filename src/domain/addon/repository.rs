use async_trait::async_trait;

use super::model::Addon;
use crate::shared::DomainResult;

#[async_trait]
pub trait AddonRepository: Send + Sync {
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Addon>>;
    async fn find_by_slug(&self, slug: &str) -> DomainResult<Option<Addon>>;
    async fn save(&self, addon: Addon) -> DomainResult<Addon>;
    async fn update(&self, addon: Addon) -> DomainResult<Addon>;
    async fn delete(&self, id: &str) -> DomainResult<()>;
}
