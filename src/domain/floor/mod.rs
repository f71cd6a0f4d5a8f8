//! Floor aggregate

pub mod model;
pub mod repository;

pub use model::{Floor, FloorDraft};
pub use repository::FloorRepository;
