//! Create catalog_entries table
//!
//! Holds bed types, features, payment statuses and room statuses. Slugs are
//! unique per kind.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CatalogEntries::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CatalogEntries::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(CatalogEntries::Kind).string_len(20).not_null())
                    .col(ColumnDef::new(CatalogEntries::Name).string().not_null())
                    .col(ColumnDef::new(CatalogEntries::Slug).string().not_null())
                    .col(
                        ColumnDef::new(CatalogEntries::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CatalogEntries::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(CatalogEntries::CreatedBy).string())
                    .col(ColumnDef::new(CatalogEntries::UpdatedBy).string())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_catalog_entries_kind_slug")
                    .table(CatalogEntries::Table)
                    .col(CatalogEntries::Kind)
                    .col(CatalogEntries::Slug)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_catalog_entries_kind_name")
                    .table(CatalogEntries::Table)
                    .col(CatalogEntries::Kind)
                    .col(CatalogEntries::Name)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CatalogEntries::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum CatalogEntries {
    Table,
    Id,
    Kind,
    Name,
    Slug,
    CreatedAt,
    UpdatedAt,
    CreatedBy,
    UpdatedBy,
}
