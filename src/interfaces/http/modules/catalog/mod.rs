//! Lookup tables: bed types, features, payment statuses, room statuses

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
