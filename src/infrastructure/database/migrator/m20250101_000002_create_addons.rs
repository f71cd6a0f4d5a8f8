//! Create addons table

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Addons::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Addons::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Addons::Name).string().not_null())
                    .col(ColumnDef::new(Addons::Slug).string().not_null().unique_key())
                    .col(
                        ColumnDef::new(Addons::PriceCents)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Addons::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Addons::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Addons::CreatedBy).string())
                    .col(ColumnDef::new(Addons::UpdatedBy).string())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Addons::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Addons {
    Table,
    Id,
    Name,
    Slug,
    PriceCents,
    CreatedAt,
    UpdatedAt,
    CreatedBy,
    UpdatedBy,
}
