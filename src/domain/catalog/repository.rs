use async_trait::async_trait;

use super::model::{CatalogEntry, CatalogKind};
use crate::shared::DomainResult;

#[async_trait]
pub trait CatalogRepository: Send + Sync {
    async fn find_by_id(&self, kind: CatalogKind, id: &str) -> DomainResult<Option<CatalogEntry>>;
    async fn find_by_slug(&self, kind: CatalogKind, slug: &str)
        -> DomainResult<Option<CatalogEntry>>;
    async fn save(&self, entry: CatalogEntry) -> DomainResult<CatalogEntry>;
    async fn update(&self, entry: CatalogEntry) -> DomainResult<CatalogEntry>;
    async fn delete(&self, kind: CatalogKind, id: &str) -> DomainResult<()>;
}
