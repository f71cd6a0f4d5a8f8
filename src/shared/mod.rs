pub mod errors;
pub mod pagination;
pub mod validations;

pub use errors::*;
pub use pagination::*;
pub use validations::*;
