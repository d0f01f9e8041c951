pub mod errors;
pub mod repositories;

pub use errors::DomainError;
pub use repositories::*;
