//! Database entities module

pub mod addon;
pub mod booking;
pub mod booking_addon;
pub mod catalog_entry;
pub mod floor;
pub mod media;
pub mod room;
pub mod room_class;
pub mod room_class_bed_type;
pub mod room_class_feature;
pub mod user;

pub use addon::Entity as Addon;
pub use booking::Entity as Booking;
pub use booking_addon::Entity as BookingAddon;
pub use catalog_entry::Entity as CatalogEntry;
pub use floor::Entity as Floor;
pub use media::Entity as Media;
pub use room::Entity as Room;
pub use room_class::Entity as RoomClass;
pub use room_class_bed_type::Entity as RoomClassBedType;
pub use room_class_feature::Entity as RoomClassFeature;
pub use user::Entity as User;
