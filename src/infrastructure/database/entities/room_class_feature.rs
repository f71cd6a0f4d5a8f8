//! Room class ↔ feature link

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "room_class_features")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub room_class_id: String,
    #[sea_orm(primary_key, auto_increment = false)]
    pub feature_id: String,
    pub position: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::room_class::Entity",
        from = "Column::RoomClassId",
        to = "super::room_class::Column::Id",
        on_delete = "Cascade"
    )]
    RoomClass,
}

impl Related<super::room_class::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RoomClass.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
