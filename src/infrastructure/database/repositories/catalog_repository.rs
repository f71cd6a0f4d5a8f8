//! SeaORM implementation of CatalogRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, Set,
};
use tracing::debug;

use super::{db_err, write_err};
use crate::domain::catalog::{CatalogEntry, CatalogKind, CatalogRepository};
use crate::domain::{Audit, DomainError, DomainResult, ListOrder};
use crate::infrastructure::database::entities::catalog_entry;
use crate::infrastructure::database::record_store::{key_contains, search_key, ListableEntity};

// ── Conversion helpers ──────────────────────────────────────────

fn model_to_domain(model: catalog_entry::Model) -> Result<CatalogEntry, DbErr> {
    let kind = CatalogKind::parse(&model.kind)
        .ok_or_else(|| DbErr::Custom(format!("Unknown catalog kind: {}", model.kind)))?;
    Ok(CatalogEntry {
        id: model.id,
        kind,
        name: model.name,
        slug: model.slug,
        audit: Audit {
            created_at: model.created_at,
            updated_at: model.updated_at,
            created_by: model.created_by,
            updated_by: model.updated_by,
        },
    })
}

fn domain_to_active(entry: CatalogEntry) -> catalog_entry::ActiveModel {
    catalog_entry::ActiveModel {
        search_key: Set(search_key(&[&entry.name])),
        id: Set(entry.id),
        kind: Set(entry.kind.as_str().to_string()),
        name: Set(entry.name),
        slug: Set(entry.slug),
        created_at: Set(entry.audit.created_at),
        updated_at: Set(entry.audit.updated_at),
        created_by: Set(entry.audit.created_by),
        updated_by: Set(entry.audit.updated_by),
    }
}

impl ListableEntity for catalog_entry::Entity {
    type Record = CatalogEntry;

    const ORDER: ListOrder = ListOrder::NewestFirst;

    fn id_column() -> Self::Column {
        catalog_entry::Column::Id
    }

    fn created_at_column() -> Self::Column {
        catalog_entry::Column::CreatedAt
    }

    fn label_column() -> Self::Column {
        catalog_entry::Column::Name
    }

    fn search_condition(needle: &str) -> Condition {
        Condition::all().add(key_contains(catalog_entry::Column::SearchKey, needle))
    }

    fn into_record(model: catalog_entry::Model) -> Result<CatalogEntry, DbErr> {
        model_to_domain(model)
    }
}

// ── SeaOrmCatalogRepository ─────────────────────────────────────

pub struct SeaOrmCatalogRepository {
    db: DatabaseConnection,
}

impl SeaOrmCatalogRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn find_one(&self, kind: CatalogKind, condition: Condition) -> DomainResult<Option<CatalogEntry>> {
        let model = catalog_entry::Entity::find()
            .filter(catalog_entry::Column::Kind.eq(kind.as_str()))
            .filter(condition)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        model.map(model_to_domain).transpose().map_err(db_err)
    }
}

#[async_trait]
impl CatalogRepository for SeaOrmCatalogRepository {
    async fn find_by_id(&self, kind: CatalogKind, id: &str) -> DomainResult<Option<CatalogEntry>> {
        self.find_one(kind, Condition::all().add(catalog_entry::Column::Id.eq(id)))
            .await
    }

    async fn find_by_slug(
        &self,
        kind: CatalogKind,
        slug: &str,
    ) -> DomainResult<Option<CatalogEntry>> {
        self.find_one(kind, Condition::all().add(catalog_entry::Column::Slug.eq(slug)))
            .await
    }

    async fn save(&self, entry: CatalogEntry) -> DomainResult<CatalogEntry> {
        let kind = entry.kind;
        let model = domain_to_active(entry)
            .insert(&self.db)
            .await
            .map_err(write_err(kind.display_name()))?;
        debug!(kind = kind.as_str(), id = %model.id, "catalog entry inserted");
        model_to_domain(model).map_err(db_err)
    }

    async fn update(&self, entry: CatalogEntry) -> DomainResult<CatalogEntry> {
        let kind = entry.kind;
        if self.find_by_id(kind, &entry.id).await?.is_none() {
            return Err(DomainError::not_found(kind.display_name(), entry.id));
        }
        let model = domain_to_active(entry)
            .update(&self.db)
            .await
            .map_err(write_err(kind.display_name()))?;
        model_to_domain(model).map_err(db_err)
    }

    async fn delete(&self, kind: CatalogKind, id: &str) -> DomainResult<()> {
        let result = catalog_entry::Entity::delete_many()
            .filter(catalog_entry::Column::Kind.eq(kind.as_str()))
            .filter(catalog_entry::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        if result.rows_affected == 0 {
            return Err(DomainError::not_found(kind.display_name(), id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    use crate::domain::catalog::CatalogDraft;
    use crate::infrastructure::database::test_database;

    fn entry(kind: CatalogKind, name: &str) -> CatalogEntry {
        CatalogEntry::new(kind, CatalogDraft { name: name.into() }, "admin@hotel.local", Utc::now())
    }

    #[tokio::test]
    async fn save_and_find_by_slug_within_kind() {
        let repo = SeaOrmCatalogRepository::new(test_database().await);
        let saved = repo.save(entry(CatalogKind::BedType, "King Size")).await.unwrap();

        let found = repo
            .find_by_slug(CatalogKind::BedType, "king-size")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.id, saved.id);
        assert!(repo
            .find_by_slug(CatalogKind::Feature, "king-size")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn same_slug_allowed_across_kinds_but_not_within() {
        let repo = SeaOrmCatalogRepository::new(test_database().await);
        repo.save(entry(CatalogKind::PaymentStatus, "Pending")).await.unwrap();
        repo.save(entry(CatalogKind::RoomStatus, "Pending")).await.unwrap();

        let err = repo
            .save(entry(CatalogKind::RoomStatus, "pending"))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)), "{:?}", err);
    }

    #[tokio::test]
    async fn delete_respects_kind() {
        let repo = SeaOrmCatalogRepository::new(test_database().await);
        let saved = repo.save(entry(CatalogKind::Feature, "Wifi")).await.unwrap();

        let err = repo.delete(CatalogKind::BedType, &saved.id).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
        repo.delete(CatalogKind::Feature, &saved.id).await.unwrap();
        assert!(repo
            .find_by_id(CatalogKind::Feature, &saved.id)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn update_missing_is_not_found() {
        let repo = SeaOrmCatalogRepository::new(test_database().await);
        let err = repo.update(entry(CatalogKind::Feature, "Balcony")).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }
}
