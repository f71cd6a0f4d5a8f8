//! Room aggregate

pub mod model;
pub mod repository;

pub use model::{Room, RoomDraft, RoomRelations};
pub use repository::RoomRepository;
