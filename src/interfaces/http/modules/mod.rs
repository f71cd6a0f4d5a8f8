pub mod addons;
pub mod auth;
pub mod bookings;
pub mod catalog;
pub mod floors;
pub mod health;
pub mod media;
pub mod metrics;
pub mod request_id;
pub mod room_classes;
pub mod rooms;
pub mod users;
