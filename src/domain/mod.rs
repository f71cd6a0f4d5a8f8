//! Domain layer: entity models, validation rules and ports.

pub mod addon;
pub mod audit;
pub mod booking;
pub mod catalog;
pub mod floor;
pub mod media;
pub mod ports;
pub mod principal;
pub mod repositories;
pub mod room;
pub mod room_class;
pub mod user;

pub use audit::Audit;
pub use ports::{AccessGuard, ListOrder, ListedRecord, RecordStore, SearchFilter};
pub use principal::Principal;
pub use repositories::RepositoryProvider;

pub use crate::shared::{DomainError, DomainResult};
