//! SeaORM implementation of MediaRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, Set,
};

use super::db_err;
use crate::domain::media::{Media, MediaRepository};
use crate::domain::{Audit, DomainError, DomainResult, ListOrder};
use crate::infrastructure::database::entities::media;
use crate::infrastructure::database::record_store::{key_contains, search_key, ListableEntity};

// ── Conversion helpers ──────────────────────────────────────────

fn model_to_domain(model: media::Model) -> Media {
    Media {
        id: model.id,
        file_url: model.file_url,
        file_name: model.file_name,
        file_type: model.file_type,
        alt_text: model.alt_text,
        caption: model.caption,
        description: model.description,
        title: model.title,
        uploaded_by: model.uploaded_by,
        audit: Audit {
            created_at: model.created_at,
            updated_at: model.updated_at,
            created_by: model.created_by,
            updated_by: model.updated_by,
        },
    }
}

fn domain_to_active(m: Media) -> media::ActiveModel {
    media::ActiveModel {
        search_key: Set(search_key(&[
            m.file_name.as_str(),
            m.alt_text.as_deref().unwrap_or_default(),
        ])),
        id: Set(m.id),
        file_url: Set(m.file_url),
        file_name: Set(m.file_name),
        file_type: Set(m.file_type),
        alt_text: Set(m.alt_text),
        caption: Set(m.caption),
        description: Set(m.description),
        title: Set(m.title),
        uploaded_by: Set(m.uploaded_by),
        created_at: Set(m.audit.created_at),
        updated_at: Set(m.audit.updated_at),
        created_by: Set(m.audit.created_by),
        updated_by: Set(m.audit.updated_by),
    }
}

impl ListableEntity for media::Entity {
    type Record = Media;

    const ORDER: ListOrder = ListOrder::NewestFirst;

    fn id_column() -> Self::Column {
        media::Column::Id
    }

    fn created_at_column() -> Self::Column {
        media::Column::CreatedAt
    }

    fn label_column() -> Self::Column {
        media::Column::FileName
    }

    fn search_condition(needle: &str) -> Condition {
        Condition::all()
            .add(key_contains(media::Column::SearchKey, needle))
    }

    fn into_record(model: media::Model) -> Result<Media, DbErr> {
        Ok(model_to_domain(model))
    }
}

// ── SeaOrmMediaRepository ───────────────────────────────────────

pub struct SeaOrmMediaRepository {
    db: DatabaseConnection,
}

impl SeaOrmMediaRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl MediaRepository for SeaOrmMediaRepository {
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Media>> {
        let model = media::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn save(&self, m: Media) -> DomainResult<Media> {
        let model = domain_to_active(m).insert(&self.db).await.map_err(db_err)?;
        Ok(model_to_domain(model))
    }

    async fn update(&self, m: Media) -> DomainResult<Media> {
        if self.find_by_id(&m.id).await?.is_none() {
            return Err(DomainError::not_found("Media", m.id));
        }
        let model = domain_to_active(m).update(&self.db).await.map_err(db_err)?;
        Ok(model_to_domain(model))
    }

    async fn delete(&self, id: &str) -> DomainResult<()> {
        let result = media::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        if result.rows_affected == 0 {
            return Err(DomainError::not_found("Media", id));
        }
        Ok(())
    }

    /// Next item in list order (newest first), i.e. the closest older one.
    async fn find_older(&self, m: &Media) -> DomainResult<Option<Media>> {
        let created = m.audit.created_at;
        let model = media::Entity::find()
            .filter(
                Condition::any()
                    .add(media::Column::CreatedAt.lt(created))
                    .add(
                        Condition::all()
                            .add(media::Column::CreatedAt.eq(created))
                            .add(media::Column::Id.lt(m.id.as_str())),
                    ),
            )
            .order_by_desc(media::Column::CreatedAt)
            .order_by_desc(media::Column::Id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_newer(&self, m: &Media) -> DomainResult<Option<Media>> {
        let created = m.audit.created_at;
        let model = media::Entity::find()
            .filter(
                Condition::any()
                    .add(media::Column::CreatedAt.gt(created))
                    .add(
                        Condition::all()
                            .add(media::Column::CreatedAt.eq(created))
                            .add(media::Column::Id.gt(m.id.as_str())),
                    ),
            )
            .order_by_asc(media::Column::CreatedAt)
            .order_by_asc(media::Column::Id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    use crate::infrastructure::database::test_database;

    async fn seed(repo: &SeaOrmMediaRepository, names: &[&str]) -> Vec<Media> {
        let base = Utc.with_ymd_and_hms(2026, 5, 1, 12, 0, 0).unwrap();
        let mut saved = Vec::new();
        for (i, name) in names.iter().enumerate() {
            let media = Media::new(
                format!("/uploads/{}", name),
                name.to_string(),
                "image/png".into(),
                "a@b.c",
                base + Duration::minutes(i as i64),
            );
            saved.push(repo.save(media).await.unwrap());
        }
        saved
    }

    #[tokio::test]
    async fn older_and_newer_neighbours() {
        let repo = SeaOrmMediaRepository::new(test_database().await);
        let items = seed(&repo, &["a.png", "b.png", "c.png"]).await;

        let older = repo.find_older(&items[1]).await.unwrap().unwrap();
        assert_eq!(older.file_name, "a.png");
        let newer = repo.find_newer(&items[1]).await.unwrap().unwrap();
        assert_eq!(newer.file_name, "c.png");

        assert!(repo.find_older(&items[0]).await.unwrap().is_none());
        assert!(repo.find_newer(&items[2]).await.unwrap().is_none());
    }
}
