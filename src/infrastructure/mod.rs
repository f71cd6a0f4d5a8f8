//! Infrastructure layer - external concerns

pub mod crypto;
pub mod database;
pub mod server;
pub mod storage;

pub use database::{init_database, run_migrations, DatabaseConfig};
pub use server::{ShutdownCoordinator, ShutdownSignal};
pub use storage::LocalUploadStorage;
