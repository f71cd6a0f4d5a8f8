use async_trait::async_trait;

use super::model::{User, UserRole};
use crate::shared::DomainResult;

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<User>>;
    /// Case-insensitive lookup.
    async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>>;
    async fn count_by_role(&self, role: UserRole) -> DomainResult<u64>;
    async fn save(&self, user: User) -> DomainResult<User>;
    async fn update(&self, user: User) -> DomainResult<User>;
    async fn delete(&self, id: &str) -> DomainResult<()>;
}
