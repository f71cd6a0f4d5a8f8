//! # Hotel Admin
//!
//! Back-office service for a hotel: lookup tables, add-ons, floors, room
//! classes, rooms, bookings, users and a media library, behind a JWT
//! protected REST API.
//!
//! ## Architecture
//!
//! - **domain**: entities, validation rules and the repository ports
//! - **application**: the paginated lister and one service per aggregate
//! - **infrastructure**: SeaORM storage, JWT/bcrypt, uploads, shutdown
//! - **interfaces**: axum REST API with Swagger documentation
//! - **shared**: errors, pagination and small string helpers

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod shared;

pub use application::AppServices;
pub use config::{default_config_path, AppConfig};
pub use infrastructure::{init_database, run_migrations, DatabaseConfig};
pub use interfaces::http::{create_api_router, AppState};
