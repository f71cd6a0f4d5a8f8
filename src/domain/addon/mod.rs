//! Add-on aggregate

pub mod model;
pub mod repository;

pub use model::{Addon, AddonDraft};
pub use repository::AddonRepository;
