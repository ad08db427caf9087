//! Types shared between the transaction vault API and its clients.

pub mod error;
pub mod protocol;

pub use error::ServiceError;
