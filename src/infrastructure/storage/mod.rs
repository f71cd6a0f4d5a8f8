//! Non-database storage: in-memory record store and local upload files

mod memory;
mod uploads;

pub use memory::InMemoryRecordStore;
pub use uploads::{LocalUploadStorage, StoredUpload};
