//! Create media table

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Media::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Media::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Media::FileUrl).string().not_null())
                    .col(ColumnDef::new(Media::FileName).string().not_null())
                    .col(ColumnDef::new(Media::FileType).string().not_null())
                    .col(ColumnDef::new(Media::AltText).string())
                    .col(ColumnDef::new(Media::Caption).string())
                    .col(ColumnDef::new(Media::Description).text())
                    .col(ColumnDef::new(Media::Title).string())
                    .col(ColumnDef::new(Media::UploadedBy).string().not_null())
                    .col(
                        ColumnDef::new(Media::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Media::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Media::CreatedBy).string())
                    .col(ColumnDef::new(Media::UpdatedBy).string())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_media_created_at")
                    .table(Media::Table)
                    .col(Media::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Media::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Media {
    Table,
    Id,
    FileUrl,
    FileName,
    FileType,
    AltText,
    Caption,
    Description,
    Title,
    UploadedBy,
    CreatedAt,
    UpdatedAt,
    CreatedBy,
    UpdatedBy,
}
