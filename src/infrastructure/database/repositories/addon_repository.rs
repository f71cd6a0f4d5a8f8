//! SeaORM implementation of AddonRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, Set,
};

use super::{db_err, from_cents, to_cents, write_err};
use crate::domain::addon::{Addon, AddonRepository};
use crate::domain::{Audit, DomainError, DomainResult, ListOrder};
use crate::infrastructure::database::entities::addon;
use crate::infrastructure::database::record_store::{key_contains, search_key, ListableEntity};

// ── Conversion helpers ──────────────────────────────────────────

fn model_to_domain(model: addon::Model) -> Addon {
    Addon {
        id: model.id,
        name: model.name,
        slug: model.slug,
        price: from_cents(model.price_cents),
        audit: Audit {
            created_at: model.created_at,
            updated_at: model.updated_at,
            created_by: model.created_by,
            updated_by: model.updated_by,
        },
    }
}

fn domain_to_active(a: Addon) -> DomainResult<addon::ActiveModel> {
    Ok(addon::ActiveModel {
        price_cents: Set(to_cents(a.price)?),
        search_key: Set(search_key(&[&a.name])),
        id: Set(a.id),
        name: Set(a.name),
        slug: Set(a.slug),
        created_at: Set(a.audit.created_at),
        updated_at: Set(a.audit.updated_at),
        created_by: Set(a.audit.created_by),
        updated_by: Set(a.audit.updated_by),
    })
}

impl ListableEntity for addon::Entity {
    type Record = Addon;

    const ORDER: ListOrder = ListOrder::NewestFirst;

    fn id_column() -> Self::Column {
        addon::Column::Id
    }

    fn created_at_column() -> Self::Column {
        addon::Column::CreatedAt
    }

    fn label_column() -> Self::Column {
        addon::Column::Name
    }

    fn search_condition(needle: &str) -> Condition {
        Condition::all().add(key_contains(addon::Column::SearchKey, needle))
    }

    fn into_record(model: addon::Model) -> Result<Addon, DbErr> {
        Ok(model_to_domain(model))
    }
}

// ── SeaOrmAddonRepository ───────────────────────────────────────

pub struct SeaOrmAddonRepository {
    db: DatabaseConnection,
}

impl SeaOrmAddonRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AddonRepository for SeaOrmAddonRepository {
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Addon>> {
        let model = addon::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_by_slug(&self, slug: &str) -> DomainResult<Option<Addon>> {
        let model = addon::Entity::find()
            .filter(addon::Column::Slug.eq(slug))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn save(&self, a: Addon) -> DomainResult<Addon> {
        let model = domain_to_active(a)?
            .insert(&self.db)
            .await
            .map_err(write_err("Add-on"))?;
        Ok(model_to_domain(model))
    }

    async fn update(&self, a: Addon) -> DomainResult<Addon> {
        if self.find_by_id(&a.id).await?.is_none() {
            return Err(DomainError::not_found("Add-on", a.id));
        }
        let model = domain_to_active(a)?
            .update(&self.db)
            .await
            .map_err(write_err("Add-on"))?;
        Ok(model_to_domain(model))
    }

    async fn delete(&self, id: &str) -> DomainResult<()> {
        let result = addon::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        if result.rows_affected == 0 {
            return Err(DomainError::not_found("Add-on", id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal::Decimal;

    use crate::domain::addon::AddonDraft;
    use crate::infrastructure::database::test_database;

    #[tokio::test]
    async fn price_survives_storage() {
        let repo = SeaOrmAddonRepository::new(test_database().await);
        let addon = Addon::new(
            AddonDraft {
                name: "Airport shuttle".into(),
                price: Decimal::new(4_599, 2),
            },
            "admin@hotel.local",
            Utc::now(),
        );
        let saved = repo.save(addon).await.unwrap();
        let found = repo.find_by_slug("airport-shuttle").await.unwrap().unwrap();
        assert_eq!(found.id, saved.id);
        assert_eq!(found.price, Decimal::new(4_599, 2));
    }

    #[tokio::test]
    async fn delete_missing_is_not_found() {
        let repo = SeaOrmAddonRepository::new(test_database().await);
        assert!(matches!(
            repo.delete("nope").await,
            Err(DomainError::NotFound { .. })
        ));
    }
}
