//! SeaORM implementation of RoomRepository

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use sea_orm::sea_query::Query;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DatabaseConnection, DbErr,
    EntityTrait, QueryFilter, Set,
};

use super::{db_err, decode_list, encode_list, write_err};
use crate::domain::catalog::CatalogKind;
use crate::domain::room::{Room, RoomRelations, RoomRepository};
use crate::domain::{Audit, DomainError, DomainResult, ListOrder};
use crate::infrastructure::database::entities::{catalog_entry, floor, room, room_class};
use crate::infrastructure::database::record_store::{key_contains, search_key, ListableEntity};

// ── Conversion helpers ──────────────────────────────────────────

fn model_to_domain(model: room::Model) -> Room {
    Room {
        id: model.id,
        room_number: model.room_number,
        room_class_id: model.room_class_id,
        floor_id: model.floor_id,
        room_status_id: model.room_status_id,
        images: decode_list(&model.images),
        related: RoomRelations::default(),
        audit: Audit {
            created_at: model.created_at,
            updated_at: model.updated_at,
            created_by: model.created_by,
            updated_by: model.updated_by,
        },
    }
}

fn domain_to_active(r: &Room) -> room::ActiveModel {
    room::ActiveModel {
        id: Set(r.id.clone()),
        room_number: Set(r.room_number.clone()),
        search_key: Set(search_key(&[&r.room_number])),
        room_class_id: Set(r.room_class_id.clone()),
        floor_id: Set(r.floor_id.clone()),
        room_status_id: Set(r.room_status_id.clone()),
        images: Set(encode_list(&r.images)),
        created_at: Set(r.audit.created_at),
        updated_at: Set(r.audit.updated_at),
        created_by: Set(r.audit.created_by.clone()),
        updated_by: Set(r.audit.updated_by.clone()),
    }
}

fn unique_ids<'a>(ids: impl Iterator<Item = &'a String>) -> Vec<String> {
    ids.cloned().collect::<HashSet<_>>().into_iter().collect()
}

/// Fills in class name, status name and floor number.
pub(crate) async fn hydrate<C: ConnectionTrait>(
    db: &C,
    mut rooms: Vec<Room>,
) -> Result<Vec<Room>, DbErr> {
    if rooms.is_empty() {
        return Ok(rooms);
    }

    let class_names: HashMap<String, String> = room_class::Entity::find()
        .filter(room_class::Column::Id.is_in(unique_ids(rooms.iter().map(|r| &r.room_class_id))))
        .all(db)
        .await?
        .into_iter()
        .map(|m| (m.id, m.class_name))
        .collect();

    let status_names: HashMap<String, String> = catalog_entry::Entity::find()
        .filter(catalog_entry::Column::Kind.eq(CatalogKind::RoomStatus.as_str()))
        .filter(
            catalog_entry::Column::Id.is_in(unique_ids(rooms.iter().map(|r| &r.room_status_id))),
        )
        .all(db)
        .await?
        .into_iter()
        .map(|m| (m.id, m.name))
        .collect();

    let floor_numbers: HashMap<String, i32> = floor::Entity::find()
        .filter(floor::Column::Id.is_in(unique_ids(rooms.iter().map(|r| &r.floor_id))))
        .all(db)
        .await?
        .into_iter()
        .map(|m| (m.id, m.floor_number))
        .collect();

    for r in &mut rooms {
        r.related = RoomRelations {
            room_class_name: class_names.get(&r.room_class_id).cloned(),
            room_status_name: status_names.get(&r.room_status_id).cloned(),
            floor_number: floor_numbers.get(&r.floor_id).copied(),
        };
    }
    Ok(rooms)
}

#[async_trait]
impl ListableEntity for room::Entity {
    type Record = Room;

    const ORDER: ListOrder = ListOrder::NewestFirst;

    fn id_column() -> Self::Column {
        room::Column::Id
    }

    fn created_at_column() -> Self::Column {
        room::Column::CreatedAt
    }

    fn label_column() -> Self::Column {
        room::Column::RoomNumber
    }

    /// Room number, room class name or room status name.
    fn search_condition(needle: &str) -> Condition {
        let classes = Query::select()
            .column(room_class::Column::Id)
            .from(room_class::Entity)
            .and_where(key_contains(room_class::Column::SearchKey, needle))
            .to_owned();
        let statuses = Query::select()
            .column(catalog_entry::Column::Id)
            .from(catalog_entry::Entity)
            .and_where(catalog_entry::Column::Kind.eq(CatalogKind::RoomStatus.as_str()))
            .and_where(key_contains(catalog_entry::Column::SearchKey, needle))
            .to_owned();

        Condition::any()
            .add(key_contains(room::Column::SearchKey, needle))
            .add(room::Column::RoomClassId.in_subquery(classes))
            .add(room::Column::RoomStatusId.in_subquery(statuses))
    }

    fn into_record(model: room::Model) -> Result<Room, DbErr> {
        Ok(model_to_domain(model))
    }

    async fn attach_related(db: &DatabaseConnection, records: Vec<Room>) -> Result<Vec<Room>, DbErr> {
        hydrate(db, records).await
    }
}

// ── SeaOrmRoomRepository ────────────────────────────────────────

pub struct SeaOrmRoomRepository {
    db: DatabaseConnection,
}

impl SeaOrmRoomRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn load(&self, model: Option<room::Model>) -> DomainResult<Option<Room>> {
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
impl RoomRepository for SeaOrmRoomRepository {
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Room>> {
        let model = room::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        self.load(model).await
    }

    async fn find_by_number(&self, room_number: &str) -> DomainResult<Option<Room>> {
        let model = room::Entity::find()
            .filter(room::Column::RoomNumber.eq(room_number))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        self.load(model).await
    }

    async fn save(&self, r: Room) -> DomainResult<Room> {
        let model = domain_to_active(&r)
            .insert(&self.db)
            .await
            .map_err(write_err("Room"))?;
        self.load(Some(model))
            .await?
            .ok_or_else(|| DomainError::not_found("Room", r.id))
    }

    async fn update(&self, r: Room) -> DomainResult<Room> {
        let exists = room::Entity::find_by_id(r.id.as_str())
            .one(&self.db)
            .await
            .map_err(db_err)?
            .is_some();
        if !exists {
            return Err(DomainError::not_found("Room", r.id));
        }
        let model = domain_to_active(&r)
            .update(&self.db)
            .await
            .map_err(write_err("Room"))?;
        self.load(Some(model))
            .await?
            .ok_or_else(|| DomainError::not_found("Room", r.id))
    }

    async fn delete(&self, id: &str) -> DomainResult<()> {
        let result = room::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        if result.rows_affected == 0 {
            return Err(DomainError::not_found("Room", id));
        }
        Ok(())
    }
}
