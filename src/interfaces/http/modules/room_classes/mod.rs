//! Room classes with their features and bed configuration

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
