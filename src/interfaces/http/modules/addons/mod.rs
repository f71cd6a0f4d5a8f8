//! Priced add-on catalog (breakfast, parking, ...)

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
