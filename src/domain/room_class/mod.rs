//! Room class aggregate

pub mod model;
pub mod repository;

pub use model::{BedTypeLine, RoomClass, RoomClassDraft, MAX_BEDS_PER_TYPE};
pub use repository::RoomClassRepository;
