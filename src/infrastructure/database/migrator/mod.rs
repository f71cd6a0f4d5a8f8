//! Database migrations module

pub use sea_orm_migration::prelude::*;

mod m20250101_000001_create_catalog_entries;
mod m20250101_000002_create_addons;
mod m20250101_000003_create_floors;
mod m20250101_000004_create_room_classes;
mod m20250101_000005_create_rooms;
mod m20250101_000006_create_users;
mod m20250101_000007_create_bookings;
mod m20250101_000008_create_media;
mod m20250101_000009_add_search_keys;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250101_000001_create_catalog_entries::Migration),
            Box::new(m20250101_000002_create_addons::Migration),
            Box::new(m20250101_000003_create_floors::Migration),
            Box::new(m20250101_000004_create_room_classes::Migration),
            Box::new(m20250101_000005_create_rooms::Migration),
            Box::new(m20250101_000006_create_users::Migration),
            Box::new(m20250101_000007_create_bookings::Migration),
            Box::new(m20250101_000008_create_media::Migration),
            Box::new(m20250101_000009_add_search_keys::Migration),
        ]
    }
}
