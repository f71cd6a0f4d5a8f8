//! SeaORM implementation of UserRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, Set,
};

use super::{db_err, decode_list, encode_list, write_err};
use crate::domain::user::{User, UserRepository, UserRole};
use crate::domain::{Audit, DomainError, DomainResult, ListOrder};
use crate::infrastructure::database::entities::user;
use crate::infrastructure::database::record_store::{key_contains, like_pattern, search_key, ListableEntity};

// ── Conversion helpers ──────────────────────────────────────────

fn entity_role_to_domain(role: user::UserRole) -> UserRole {
    match role {
        user::UserRole::Guest => UserRole::Guest,
        user::UserRole::Staff => UserRole::Staff,
        user::UserRole::Manager => UserRole::Manager,
        user::UserRole::Admin => UserRole::Admin,
    }
}

pub(crate) fn domain_role_to_entity(role: UserRole) -> user::UserRole {
    match role {
        UserRole::Guest => user::UserRole::Guest,
        UserRole::Staff => user::UserRole::Staff,
        UserRole::Manager => user::UserRole::Manager,
        UserRole::Admin => user::UserRole::Admin,
    }
}

fn user_model_to_domain(model: user::Model) -> User {
    User {
        id: model.id,
        name: model.name,
        email: model.email,
        password_hash: model.password_hash,
        role: entity_role_to_domain(model.role),
        bio: model.bio,
        avatar_urls: decode_list(&model.avatar_urls),
        email_verified: model.email_verified,
        audit: Audit {
            created_at: model.created_at,
            updated_at: model.updated_at,
            created_by: model.created_by,
            updated_by: model.updated_by,
        },
    }
}

fn domain_to_active(u: User) -> user::ActiveModel {
    user::ActiveModel {
        search_key: Set(search_key(&[&u.name])),
        avatar_urls: Set(encode_list(&u.avatar_urls)),
        id: Set(u.id),
        name: Set(u.name),
        email: Set(u.email),
        password_hash: Set(u.password_hash),
        role: Set(domain_role_to_entity(u.role)),
        bio: Set(u.bio),
        email_verified: Set(u.email_verified),
        created_at: Set(u.audit.created_at),
        updated_at: Set(u.audit.updated_at),
        created_by: Set(u.audit.created_by),
        updated_by: Set(u.audit.updated_by),
    }
}

impl ListableEntity for user::Entity {
    type Record = User;

    const ORDER: ListOrder = ListOrder::NewestFirst;

    fn id_column() -> Self::Column {
        user::Column::Id
    }

    fn created_at_column() -> Self::Column {
        user::Column::CreatedAt
    }

    fn label_column() -> Self::Column {
        user::Column::Name
    }

    fn search_condition(needle: &str) -> Condition {
        Condition::any()
            .add(key_contains(user::Column::SearchKey, needle))
            // stored already lowercased
            .add(user::Column::Email.like(like_pattern(needle)))
    }

    fn into_record(model: user::Model) -> Result<User, DbErr> {
        Ok(user_model_to_domain(model))
    }
}

// ── SeaOrmUserRepository ────────────────────────────────────────

pub struct SeaOrmUserRepository {
    db: DatabaseConnection,
}

impl SeaOrmUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for SeaOrmUserRepository {
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<User>> {
        let model = user::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(user_model_to_domain))
    }

    async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>> {
        let model = user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(user_model_to_domain))
    }

    async fn count_by_role(&self, role: UserRole) -> DomainResult<u64> {
        user::Entity::find()
            .filter(user::Column::Role.eq(domain_role_to_entity(role)))
            .count(&self.db)
            .await
            .map_err(db_err)
    }

    async fn save(&self, u: User) -> DomainResult<User> {
        let model = domain_to_active(u)
            .insert(&self.db)
            .await
            .map_err(write_err("Email"))?;
        Ok(user_model_to_domain(model))
    }

    async fn update(&self, u: User) -> DomainResult<User> {
        if self.find_by_id(&u.id).await?.is_none() {
            return Err(DomainError::not_found("User", u.id));
        }
        let model = domain_to_active(u)
            .update(&self.db)
            .await
            .map_err(write_err("Email"))?;
        Ok(user_model_to_domain(model))
    }

    async fn delete(&self, id: &str) -> DomainResult<()> {
        let result = user::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        if result.rows_affected == 0 {
            return Err(DomainError::not_found("User", id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    use crate::domain::user::UserDraft;
    use crate::domain::{RecordStore, SearchFilter};
    use crate::infrastructure::database::{test_database, SeaOrmRecordStore};

    fn user(name: &str, email: &str, role: UserRole) -> User {
        User::new(
            UserDraft {
                name: name.into(),
                email: email.into(),
                password: None,
                role,
                bio: None,
                avatar_urls: vec!["/uploads/me.png".into()],
            },
            "$2b$04$hash".into(),
            "system",
            Utc::now(),
        )
    }

    #[tokio::test]
    async fn role_and_avatars_survive_storage() {
        let repo = SeaOrmUserRepository::new(test_database().await);
        repo.save(user("Maria", "maria@hotel.local", UserRole::Manager))
            .await
            .unwrap();

        let found = repo.find_by_email("maria@hotel.local").await.unwrap().unwrap();
        assert_eq!(found.role, UserRole::Manager);
        assert_eq!(found.avatar_urls, vec!["/uploads/me.png"]);
        assert_eq!(repo.count_by_role(UserRole::Manager).await.unwrap(), 1);
        assert_eq!(repo.count_by_role(UserRole::Admin).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn duplicate_email_is_conflict() {
        let repo = SeaOrmUserRepository::new(test_database().await);
        repo.save(user("A", "dup@hotel.local", UserRole::Guest)).await.unwrap();
        let err = repo
            .save(user("B", "dup@hotel.local", UserRole::Guest))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Already exists: Email already exists");
    }

    #[tokio::test]
    async fn guest_scope_filters_by_role() {
        let db = test_database().await;
        let repo = SeaOrmUserRepository::new(db.clone());
        repo.save(user("Guest One", "g1@x.io", UserRole::Guest)).await.unwrap();
        repo.save(user("Guest Two", "g2@x.io", UserRole::Guest)).await.unwrap();
        repo.save(user("Staff Guest", "s@x.io", UserRole::Staff)).await.unwrap();

        let guests = SeaOrmRecordStore::<user::Entity>::new(db.clone())
            .scoped(user::Column::Role, UserRole::Guest.as_str());
        assert_eq!(guests.count(&SearchFilter::All).await.unwrap(), 2);
        assert_eq!(
            guests.count(&SearchFilter::from_query("staff")).await.unwrap(),
            0
        );

        let everyone = SeaOrmRecordStore::<user::Entity>::new(db);
        assert_eq!(
            everyone.count(&SearchFilter::from_query("X.IO")).await.unwrap(),
            3
        );
    }
}
