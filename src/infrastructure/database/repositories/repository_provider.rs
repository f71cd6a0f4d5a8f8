//! SeaORM implementation of RepositoryProvider

use sea_orm::DatabaseConnection;

use crate::domain::addon::AddonRepository;
use crate::domain::booking::BookingRepository;
use crate::domain::catalog::CatalogRepository;
use crate::domain::floor::FloorRepository;
use crate::domain::media::MediaRepository;
use crate::domain::repositories::RepositoryProvider;
use crate::domain::room::RoomRepository;
use crate::domain::room_class::RoomClassRepository;
use crate::domain::user::UserRepository;

use super::addon_repository::SeaOrmAddonRepository;
use super::booking_repository::SeaOrmBookingRepository;
use super::catalog_repository::SeaOrmCatalogRepository;
use super::floor_repository::SeaOrmFloorRepository;
use super::media_repository::SeaOrmMediaRepository;
use super::room_class_repository::SeaOrmRoomClassRepository;
use super::room_repository::SeaOrmRoomRepository;
use super::user_repository::SeaOrmUserRepository;

/// Unified repository provider backed by SeaORM.
///
/// Holds one connection pool and exposes per-aggregate repository accessors.
///
/// ```ignore
/// let repos = SeaOrmRepositoryProvider::new(db.clone());
/// let room = repos.rooms().find_by_number("301").await?;
/// let status = repos.catalog().find_by_id(CatalogKind::RoomStatus, &room.room_status_id).await?;
/// ```
pub struct SeaOrmRepositoryProvider {
    catalog: SeaOrmCatalogRepository,
    addons: SeaOrmAddonRepository,
    floors: SeaOrmFloorRepository,
    room_classes: SeaOrmRoomClassRepository,
    rooms: SeaOrmRoomRepository,
    bookings: SeaOrmBookingRepository,
    users: SeaOrmUserRepository,
    media: SeaOrmMediaRepository,
}

impl SeaOrmRepositoryProvider {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            catalog: SeaOrmCatalogRepository::new(db.clone()),
            addons: SeaOrmAddonRepository::new(db.clone()),
            floors: SeaOrmFloorRepository::new(db.clone()),
            room_classes: SeaOrmRoomClassRepository::new(db.clone()),
            rooms: SeaOrmRoomRepository::new(db.clone()),
            bookings: SeaOrmBookingRepository::new(db.clone()),
            users: SeaOrmUserRepository::new(db.clone()),
            media: SeaOrmMediaRepository::new(db),
        }
    }
}

impl RepositoryProvider for SeaOrmRepositoryProvider {
    fn catalog(&self) -> &dyn CatalogRepository {
        &self.catalog
    }

    fn addons(&self) -> &dyn AddonRepository {
        &self.addons
    }

    fn floors(&self) -> &dyn FloorRepository {
        &self.floors
    }

    fn room_classes(&self) -> &dyn RoomClassRepository {
        &self.room_classes
    }

    fn rooms(&self) -> &dyn RoomRepository {
        &self.rooms
    }

    fn bookings(&self) -> &dyn BookingRepository {
        &self.bookings
    }

    fn users(&self) -> &dyn UserRepository {
        &self.users
    }

    fn media(&self) -> &dyn MediaRepository {
        &self.media
    }
}
