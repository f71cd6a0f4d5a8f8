//! Catalog aggregate (bed types, features, payment and room statuses)

pub mod model;
pub mod repository;

pub use model::{CatalogDraft, CatalogEntry, CatalogKind};
pub use repository::CatalogRepository;
