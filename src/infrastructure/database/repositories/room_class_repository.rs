//! SeaORM implementation of RoomClassRepository
//!
//! Features and bed-type lines live in link tables and are replaced
//! wholesale on every update, inside one transaction.

use std::collections::HashMap;

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DatabaseConnection, DbErr,
    EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use tracing::debug;

use super::{db_err, decode_list, encode_list, from_cents, to_cents, write_err};
use crate::domain::room_class::{BedTypeLine, RoomClass, RoomClassRepository};
use crate::domain::{Audit, DomainError, DomainResult, ListOrder};
use crate::infrastructure::database::entities::{room_class, room_class_bed_type, room_class_feature};
use crate::infrastructure::database::record_store::{key_contains, search_key, ListableEntity};

// ── Conversion helpers ──────────────────────────────────────────

fn model_to_domain(model: room_class::Model) -> RoomClass {
    RoomClass {
        id: model.id,
        class_name: model.class_name,
        slug: model.slug,
        base_price: from_cents(model.base_price_cents),
        images: decode_list(&model.images),
        description: model.description,
        features: Vec::new(),
        bed_types: Vec::new(),
        audit: Audit {
            created_at: model.created_at,
            updated_at: model.updated_at,
            created_by: model.created_by,
            updated_by: model.updated_by,
        },
    }
}

fn domain_to_active(rc: &RoomClass) -> DomainResult<room_class::ActiveModel> {
    Ok(room_class::ActiveModel {
        id: Set(rc.id.clone()),
        class_name: Set(rc.class_name.clone()),
        search_key: Set(search_key(&[&rc.class_name])),
        slug: Set(rc.slug.clone()),
        base_price_cents: Set(to_cents(rc.base_price)?),
        images: Set(encode_list(&rc.images)),
        description: Set(rc.description.clone()),
        created_at: Set(rc.audit.created_at),
        updated_at: Set(rc.audit.updated_at),
        created_by: Set(rc.audit.created_by.clone()),
        updated_by: Set(rc.audit.updated_by.clone()),
    })
}

/// Loads features and bed-type lines for a batch of room classes.
pub(crate) async fn hydrate<C: ConnectionTrait>(
    db: &C,
    mut classes: Vec<RoomClass>,
) -> Result<Vec<RoomClass>, DbErr> {
    if classes.is_empty() {
        return Ok(classes);
    }
    let ids: Vec<String> = classes.iter().map(|c| c.id.clone()).collect();

    let mut features: HashMap<String, Vec<String>> = HashMap::new();
    for link in room_class_feature::Entity::find()
        .filter(room_class_feature::Column::RoomClassId.is_in(ids.clone()))
        .order_by_asc(room_class_feature::Column::Position)
        .all(db)
        .await?
    {
        features.entry(link.room_class_id).or_default().push(link.feature_id);
    }

    let mut beds: HashMap<String, Vec<BedTypeLine>> = HashMap::new();
    for link in room_class_bed_type::Entity::find()
        .filter(room_class_bed_type::Column::RoomClassId.is_in(ids))
        .order_by_asc(room_class_bed_type::Column::Position)
        .all(db)
        .await?
    {
        beds.entry(link.room_class_id).or_default().push(BedTypeLine {
            bed_type_id: link.bed_type_id,
            num_beds: link.num_beds,
        });
    }

    for class in &mut classes {
        class.features = features.remove(&class.id).unwrap_or_default();
        class.bed_types = beds.remove(&class.id).unwrap_or_default();
    }
    Ok(classes)
}

async fn write_links<C: ConnectionTrait>(db: &C, rc: &RoomClass) -> Result<(), DbErr> {
    room_class_feature::Entity::delete_many()
        .filter(room_class_feature::Column::RoomClassId.eq(rc.id.as_str()))
        .exec(db)
        .await?;
    room_class_bed_type::Entity::delete_many()
        .filter(room_class_bed_type::Column::RoomClassId.eq(rc.id.as_str()))
        .exec(db)
        .await?;

    if !rc.features.is_empty() {
        let links = rc
            .features
            .iter()
            .enumerate()
            .map(|(i, feature_id)| room_class_feature::ActiveModel {
                room_class_id: Set(rc.id.clone()),
                feature_id: Set(feature_id.clone()),
                position: Set(i as i32),
            });
        room_class_feature::Entity::insert_many(links)
            .exec_without_returning(db)
            .await?;
    }

    if !rc.bed_types.is_empty() {
        let links = rc
            .bed_types
            .iter()
            .enumerate()
            .map(|(i, line)| room_class_bed_type::ActiveModel {
                room_class_id: Set(rc.id.clone()),
                bed_type_id: Set(line.bed_type_id.clone()),
                num_beds: Set(line.num_beds),
                position: Set(i as i32),
            });
        room_class_bed_type::Entity::insert_many(links)
            .exec_without_returning(db)
            .await?;
    }
    Ok(())
}

#[async_trait]
impl ListableEntity for room_class::Entity {
    type Record = RoomClass;

    const ORDER: ListOrder = ListOrder::NewestFirst;

    fn id_column() -> Self::Column {
        room_class::Column::Id
    }

    fn created_at_column() -> Self::Column {
        room_class::Column::CreatedAt
    }

    fn label_column() -> Self::Column {
        room_class::Column::ClassName
    }

    fn search_condition(needle: &str) -> Condition {
        Condition::all().add(key_contains(room_class::Column::SearchKey, needle))
    }

    fn into_record(model: room_class::Model) -> Result<RoomClass, DbErr> {
        Ok(model_to_domain(model))
    }

    async fn attach_related(
        db: &DatabaseConnection,
        records: Vec<RoomClass>,
    ) -> Result<Vec<RoomClass>, DbErr> {
        hydrate(db, records).await
    }
}

// ── SeaOrmRoomClassRepository ───────────────────────────────────

pub struct SeaOrmRoomClassRepository {
    db: DatabaseConnection,
}

impl SeaOrmRoomClassRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn load(&self, model: Option<room_class::Model>) -> DomainResult<Option<RoomClass>> {
        let Some(model) = model else {
            return Ok(None);
        };
        let mut hydrated = hydrate(&self.db, vec![model_to_domain(model)])
            .await
            .map_err(db_err)?;
        Ok(hydrated.pop())
    }
}

#[async_trait]
impl RoomClassRepository for SeaOrmRoomClassRepository {
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<RoomClass>> {
        let model = room_class::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        self.load(model).await
    }

    async fn find_by_slug(&self, slug: &str) -> DomainResult<Option<RoomClass>> {
        let model = room_class::Entity::find()
            .filter(room_class::Column::Slug.eq(slug))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        self.load(model).await
    }

    async fn save(&self, rc: RoomClass) -> DomainResult<RoomClass> {
        let active = domain_to_active(&rc)?;
        let txn = self.db.begin().await.map_err(db_err)?;
        active.insert(&txn).await.map_err(write_err("Room class"))?;
        write_links(&txn, &rc).await.map_err(db_err)?;
        txn.commit().await.map_err(db_err)?;

        debug!(id = %rc.id, features = rc.features.len(), "room class inserted");
        self.find_by_id(&rc.id)
            .await?
            .ok_or_else(|| DomainError::not_found("Room class", rc.id))
    }

    async fn update(&self, rc: RoomClass) -> DomainResult<RoomClass> {
        let exists = room_class::Entity::find_by_id(rc.id.as_str())
            .one(&self.db)
            .await
            .map_err(db_err)?
            .is_some();
        if !exists {
            return Err(DomainError::not_found("Room class", rc.id));
        }

        let active = domain_to_active(&rc)?;
        let txn = self.db.begin().await.map_err(db_err)?;
        active.update(&txn).await.map_err(write_err("Room class"))?;
        write_links(&txn, &rc).await.map_err(db_err)?;
        txn.commit().await.map_err(db_err)?;

        self.find_by_id(&rc.id)
            .await?
            .ok_or_else(|| DomainError::not_found("Room class", rc.id))
    }

    async fn delete(&self, id: &str) -> DomainResult<()> {
        let txn = self.db.begin().await.map_err(db_err)?;
        room_class_feature::Entity::delete_many()
            .filter(room_class_feature::Column::RoomClassId.eq(id))
            .exec(&txn)
            .await
            .map_err(db_err)?;
        room_class_bed_type::Entity::delete_many()
            .filter(room_class_bed_type::Column::RoomClassId.eq(id))
            .exec(&txn)
            .await
            .map_err(db_err)?;
        let result = room_class::Entity::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(db_err)?;
        if result.rows_affected == 0 {
            txn.rollback().await.map_err(db_err)?;
            return Err(DomainError::not_found("Room class", id));
        }
        txn.commit().await.map_err(db_err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal::Decimal;

    use crate::domain::room_class::RoomClassDraft;
    use crate::infrastructure::database::test_database;

    fn draft(features: &[&str], beds: &[(&str, i32)]) -> RoomClassDraft {
        RoomClassDraft {
            class_name: "Deluxe Suite".into(),
            base_price: Decimal::new(25_000, 2),
            images: vec!["/uploads/a.jpg".into(), "/uploads/b.jpg".into()],
            description: Some("Sea view".into()),
            features: features.iter().map(|s| s.to_string()).collect(),
            bed_types: beds
                .iter()
                .map(|(id, n)| BedTypeLine {
                    bed_type_id: id.to_string(),
                    num_beds: *n,
                })
                .collect(),
        }
    }

    #[tokio::test]
    async fn links_round_trip_in_order() {
        let repo = SeaOrmRoomClassRepository::new(test_database().await);
        let rc = RoomClass::new(draft(&["f-2", "f-1"], &[("b-1", 2)]), "a@b.c", Utc::now());
        let saved = repo.save(rc).await.unwrap();

        assert_eq!(saved.features, vec!["f-2", "f-1"]);
        assert_eq!(saved.bed_types.len(), 1);
        assert_eq!(saved.images.len(), 2);
        assert_eq!(saved.base_price, Decimal::new(25_000, 2));
    }

    #[tokio::test]
    async fn update_replaces_links_wholesale() {
        let repo = SeaOrmRoomClassRepository::new(test_database().await);
        let mut rc = repo
            .save(RoomClass::new(
                draft(&["f-1", "f-2"], &[("b-1", 1), ("b-2", 3)]),
                "a@b.c",
                Utc::now(),
            ))
            .await
            .unwrap();

        rc.apply(draft(&["f-3"], &[("b-2", 1)]), "a@b.c", Utc::now());
        let updated = repo.update(rc).await.unwrap();
        assert_eq!(updated.features, vec!["f-3"]);
        assert_eq!(
            updated.bed_types,
            vec![BedTypeLine {
                bed_type_id: "b-2".into(),
                num_beds: 1
            }]
        );
    }

    #[tokio::test]
    async fn delete_removes_class_and_links() {
        let db = test_database().await;
        let repo = SeaOrmRoomClassRepository::new(db.clone());
        let rc = repo
            .save(RoomClass::new(draft(&["f-1"], &[]), "a@b.c", Utc::now()))
            .await
            .unwrap();

        repo.delete(&rc.id).await.unwrap();
        assert!(repo.find_by_id(&rc.id).await.unwrap().is_none());
        let orphans = room_class_feature::Entity::find().all(&db).await.unwrap();
        assert!(orphans.is_empty());
        assert!(matches!(
            repo.delete(&rc.id).await,
            Err(DomainError::NotFound { .. })
        ));
    }
}
