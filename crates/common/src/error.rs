//! Service-level error type shared by the API crate.

use envelope::EnvelopeError;
use thiserror::Error;

/// Top-level service error type.
///
/// Variants map to HTTP status codes returned to callers:
/// - [`ServiceError::InvalidInput`] → 400
/// - [`ServiceError::Envelope`] → 400
/// - [`ServiceError::NotFound`] → 404
/// - [`ServiceError::EncryptionFailure`] → 500
/// - [`ServiceError::Internal`] → 500
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The request body was malformed or failed validation.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// No record exists under the requested id.
    #[error("transaction not found")]
    NotFound,

    /// A stored record could not be opened (structural, integrity or
    /// compatibility failure in the envelope core).
    #[error(transparent)]
    Envelope(EnvelopeError),

    /// Building a new record failed.
    #[error("encryption failure: {0}")]
    EncryptionFailure(EnvelopeError),

    /// An unexpected internal error occurred (e.g. the record store failed).
    #[error("internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    /// Returns the HTTP status code that should be sent for this error.
    pub fn http_status(&self) -> u16 {
        match self {
            ServiceError::InvalidInput(_) => 400,
            ServiceError::Envelope(_) => 400,
            ServiceError::NotFound => 404,
            ServiceError::EncryptionFailure(_) => 500,
            ServiceError::Internal(_) => 500,
        }
    }

    /// Machine-readable error code for the response body.
    pub fn code(&self) -> &'static str {
        match self {
            ServiceError::InvalidInput(_) => "invalid_input",
            ServiceError::NotFound => "not_found",
            ServiceError::Envelope(e) => e.code(),
            ServiceError::EncryptionFailure(_) => "encryption_failed",
            ServiceError::Internal(_) => "internal_error",
        }
    }
}

impl From<EnvelopeError> for ServiceError {
    fn from(err: EnvelopeError) -> Self {
        ServiceError::Envelope(err)
    }
}
