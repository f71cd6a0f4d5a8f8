//! Media library aggregate

pub mod model;
pub mod repository;

pub use model::{Media, MediaMetadata};
pub use repository::MediaRepository;
