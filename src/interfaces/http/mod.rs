//! HTTP REST API interfaces
//!
//! - `middleware`: optional JWT authentication and the request guard
//! - `modules`: one module per resource (DTOs + handlers)
//! - `router`: API router with Swagger documentation

pub mod common;
pub mod middleware;
pub mod modules;
pub mod router;

pub use router::{create_api_router, ApiDoc, AppState};
