pub mod datetime;
pub mod error;
pub mod ident;
pub mod validate;

pub use error::DomainError;
