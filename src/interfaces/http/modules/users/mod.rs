//! Users module: staff accounts and guests

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
