//! User aggregate
//!
//! Contains the User entity, its role enum and repository interface.

pub mod model;
pub mod repository;

pub use model::{normalize_email, User, UserDraft, UserRole, MIN_PASSWORD_LEN};
pub use repository::UserRepository;
