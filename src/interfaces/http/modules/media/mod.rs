//! Media library: uploads, metadata and viewer navigation

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
