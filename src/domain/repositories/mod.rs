//! Repository traits for the domain layer
//!
//! `RepositoryProvider` gives unified access to the per-aggregate
//! repositories; list reads go through `RecordStore` instead.

use super::addon::AddonRepository;
use super::booking::BookingRepository;
use super::catalog::CatalogRepository;
use super::floor::FloorRepository;
use super::media::MediaRepository;
use super::room::RoomRepository;
use super::room_class::RoomClassRepository;
use super::user::UserRepository;

/// Provides access to all domain repositories.
///
/// ```ignore
/// async fn handle(repos: &dyn RepositoryProvider) {
///     let floor = repos.floors().find_by_number(3).await?;
///     let room = repos.rooms().find_by_number("301").await?;
/// }
/// ```
pub trait RepositoryProvider: Send + Sync {
    fn catalog(&self) -> &dyn CatalogRepository;
    fn addons(&self) -> &dyn AddonRepository;
    fn floors(&self) -> &dyn FloorRepository;
    fn room_classes(&self) -> &dyn RoomClassRepository;
    fn rooms(&self) -> &dyn RoomRepository;
    fn bookings(&self) -> &dyn BookingRepository;
    fn users(&self) -> &dyn UserRepository;
    fn media(&self) -> &dyn MediaRepository;
}
