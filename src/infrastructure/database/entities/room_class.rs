//! Room class entity

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "room_classes")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub class_name: String,
    #[sea_orm(unique)]
    pub slug: String,
    /// Base price in cents
    pub base_price_cents: i64,
    /// JSON array of image URLs
    pub images: String,
    pub description: Option<String>,
    /// Lowercased searchable text, see `record_store::search_key`
    pub search_key: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub created_by: Option<String>,
    pub updated_by: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::room_class_feature::Entity")]
    Features,
    #[sea_orm(has_many = "super::room_class_bed_type::Entity")]
    BedTypes,
    #[sea_orm(has_many = "super::room::Entity")]
    Rooms,
}

impl Related<super::room_class_feature::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Features.def()
    }
}

impl Related<super::room_class_bed_type::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BedTypes.def()
    }
}

impl Related<super::room::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Rooms.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
