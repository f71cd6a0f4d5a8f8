//! Authentication module: login and current principal

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
