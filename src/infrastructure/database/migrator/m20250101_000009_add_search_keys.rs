//! Add `search_key` to every searchable table
//!
//! SQLite `LOWER()` only folds ASCII, so list searches match against a key
//! folded in Rust when the row is written. Existing rows are backfilled.

use sea_orm::{ConnectionTrait, Statement, Value};
use sea_orm_migration::prelude::*;

use super::m20250101_000001_create_catalog_entries::CatalogEntries;
use super::m20250101_000002_create_addons::Addons;
use super::m20250101_000004_create_room_classes::RoomClasses;
use super::m20250101_000005_create_rooms::Rooms;
use super::m20250101_000006_create_users::Users;
use super::m20250101_000008_create_media::Media;
use crate::infrastructure::database::record_store::search_key;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Table and the columns folded into its key, in key order.
const SOURCES: [(&str, &[&str]); 6] = [
    ("catalog_entries", &["name"]),
    ("addons", &["name"]),
    ("room_classes", &["class_name"]),
    ("rooms", &["room_number"]),
    ("users", &["name"]),
    ("media", &["file_name", "alt_text"]),
];

fn add_key(table: impl IntoIden + 'static) -> TableAlterStatement {
    Table::alter()
        .table(table)
        .add_column(
            ColumnDef::new(SearchKey::SearchKey)
                .string()
                .not_null()
                .default(""),
        )
        .to_owned()
}

async fn backfill(manager: &SchemaManager<'_>, table: &str, columns: &[&str]) -> Result<(), DbErr> {
    let db = manager.get_connection();
    let backend = manager.get_database_backend();
    let rows = db
        .query_all(Statement::from_string(
            backend,
            format!("SELECT id, {} FROM {}", columns.join(", "), table),
        ))
        .await?;

    for row in rows {
        let id: String = row.try_get("", "id")?;
        let mut fields = Vec::with_capacity(columns.len());
        for column in columns {
            let value: Option<String> = row.try_get("", column)?;
            fields.push(value.unwrap_or_default());
        }
        db.execute(Statement::from_sql_and_values(
            backend,
            format!("UPDATE {} SET search_key = ? WHERE id = ?", table),
            [Value::from(search_key(&fields)), Value::from(id)],
        ))
        .await?;
    }
    Ok(())
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.alter_table(add_key(CatalogEntries::Table)).await?;
        manager.alter_table(add_key(Addons::Table)).await?;
        manager.alter_table(add_key(RoomClasses::Table)).await?;
        manager.alter_table(add_key(Rooms::Table)).await?;
        manager.alter_table(add_key(Users::Table)).await?;
        manager.alter_table(add_key(Media::Table)).await?;

        for (table, columns) in SOURCES {
            backfill(manager, table, columns).await?;
        }
        Ok(())
    }

    async fn down(&self, _manager: &SchemaManager) -> Result<(), DbErr> {
        // SQLite cannot drop columns in place; the keys are harmless if left.
        Ok(())
    }
}

#[derive(Iden)]
enum SearchKey {
    SearchKey,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::database::test_database;

    #[tokio::test]
    async fn backfill_folds_existing_rows() {
        let db = test_database().await;
        db.execute_unprepared(
            "INSERT INTO catalog_entries (id, kind, name, slug, created_at, updated_at) \
             VALUES ('legacy', 'feature', 'ÉTAGE Privé', 'etage-prive', \
             '2026-01-01T00:00:00+00:00', '2026-01-01T00:00:00+00:00')",
        )
        .await
        .unwrap();

        let manager = SchemaManager::new(&db);
        backfill(&manager, "catalog_entries", &["name"]).await.unwrap();

        let row = db
            .query_one(Statement::from_string(
                db.get_database_backend(),
                "SELECT search_key FROM catalog_entries WHERE id = 'legacy'".to_string(),
            ))
            .await
            .unwrap()
            .unwrap();
        let key: String = row.try_get("", "search_key").unwrap();
        assert_eq!(key, "étage privé");
    }
}
