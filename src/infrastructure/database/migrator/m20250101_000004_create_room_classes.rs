//! Create room_classes with its feature and bed-type link tables

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(RoomClasses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(RoomClasses::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(RoomClasses::ClassName).string().not_null())
                    .col(
                        ColumnDef::new(RoomClasses::Slug)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(RoomClasses::BasePriceCents)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(RoomClasses::Images)
                            .text()
                            .not_null()
                            .default("[]"),
                    )
                    .col(ColumnDef::new(RoomClasses::Description).text())
                    .col(
                        ColumnDef::new(RoomClasses::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RoomClasses::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(RoomClasses::CreatedBy).string())
                    .col(ColumnDef::new(RoomClasses::UpdatedBy).string())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(RoomClassFeatures::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(RoomClassFeatures::RoomClassId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RoomClassFeatures::FeatureId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RoomClassFeatures::Position)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .primary_key(
                        Index::create()
                            .col(RoomClassFeatures::RoomClassId)
                            .col(RoomClassFeatures::FeatureId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_room_class_features_room_class")
                            .from(RoomClassFeatures::Table, RoomClassFeatures::RoomClassId)
                            .to(RoomClasses::Table, RoomClasses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(RoomClassBedTypes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(RoomClassBedTypes::RoomClassId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RoomClassBedTypes::BedTypeId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RoomClassBedTypes::NumBeds)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .col(
                        ColumnDef::new(RoomClassBedTypes::Position)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .primary_key(
                        Index::create()
                            .col(RoomClassBedTypes::RoomClassId)
                            .col(RoomClassBedTypes::BedTypeId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_room_class_bed_types_room_class")
                            .from(RoomClassBedTypes::Table, RoomClassBedTypes::RoomClassId)
                            .to(RoomClasses::Table, RoomClasses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(RoomClassBedTypes::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(RoomClassFeatures::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(RoomClasses::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum RoomClasses {
    Table,
    Id,
    ClassName,
    Slug,
    BasePriceCents,
    Images,
    Description,
    CreatedAt,
    UpdatedAt,
    CreatedBy,
    UpdatedBy,
}

#[derive(Iden)]
pub enum RoomClassFeatures {
    Table,
    RoomClassId,
    FeatureId,
    Position,
}

#[derive(Iden)]
pub enum RoomClassBedTypes {
    Table,
    RoomClassId,
    BedTypeId,
    NumBeds,
    Position,
}
