//! Application services, one per aggregate

mod addon;
mod booking;
mod catalog;
mod floor;
mod media;
mod room;
mod room_class;
mod user;

#[cfg(test)]
mod tests;

pub use addon::AddonService;
pub use booking::BookingService;
pub use catalog::CatalogService;
pub use floor::FloorService;
pub use media::{MediaService, Upload};
pub use room::RoomService;
pub use room_class::RoomClassService;
pub use user::{principal_of, AuthResult, DefaultAdmin, UserService};
