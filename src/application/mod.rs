//! Application layer: the generic lister, access checks and the
//! per-aggregate services.

pub mod access;
pub mod context;
pub mod lister;
pub mod services;

pub use context::AppServices;
pub use lister::{ListSettings, Lister, MatchCount};
