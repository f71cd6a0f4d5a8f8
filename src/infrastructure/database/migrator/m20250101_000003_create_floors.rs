//! Create floors table

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Floors::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Floors::Id).string().not_null().primary_key())
                    .col(
                        ColumnDef::new(Floors::FloorNumber)
                            .integer()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Floors::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Floors::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Floors::CreatedBy).string())
                    .col(ColumnDef::new(Floors::UpdatedBy).string())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Floors::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Floors {
    Table,
    Id,
    FloorNumber,
    CreatedAt,
    UpdatedAt,
    CreatedBy,
    UpdatedBy,
}
