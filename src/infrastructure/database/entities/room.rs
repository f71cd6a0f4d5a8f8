//! Room entity

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "rooms")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    #[sea_orm(unique)]
    pub room_number: String,
    pub room_class_id: String,
    pub floor_id: String,
    /// Catalog entry of kind `room_status`
    pub room_status_id: String,
    /// JSON array of image URLs, display order
    pub images: String,
    /// Lowercased searchable text, see `record_store::search_key`
    pub search_key: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub created_by: Option<String>,
    pub updated_by: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::room_class::Entity",
        from = "Column::RoomClassId",
        to = "super::room_class::Column::Id"
    )]
    RoomClass,
    #[sea_orm(
        belongs_to = "super::floor::Entity",
        from = "Column::FloorId",
        to = "super::floor::Column::Id"
    )]
    Floor,
}

impl Related<super::room_class::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RoomClass.def()
    }
}

impl Related<super::floor::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Floor.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
