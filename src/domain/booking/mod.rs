//! Booking aggregate

pub mod model;
pub mod repository;

pub use model::{Booking, BookingAddon, BookingDraft, BookingRelations, MAX_ADULTS, MAX_CHILDREN};
pub use repository::BookingRepository;
