//! Request and response bodies for the HTTP API.
//!
//! Field names follow the wire format of stored records (`partyId`,
//! `createdAt`), so clients see one naming scheme throughout.

use serde::{Deserialize, Serialize};

pub use envelope::TxSecureRecord;

// ---------------------------------------------------------------------------
// Encrypt endpoint
// ---------------------------------------------------------------------------

/// Request body for `POST /tx/encrypt`.
///
/// The response is the full [`TxSecureRecord`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncryptRequest {
    /// Owner of the transaction. Must be non-empty.
    #[serde(rename = "partyId")]
    pub party_id: String,
    /// Arbitrary JSON value to encrypt.
    #[serde(default)]
    pub payload: serde_json::Value,
}

// ---------------------------------------------------------------------------
// Decrypt endpoint
// ---------------------------------------------------------------------------

/// Successful response body for `POST /tx/{id}/decrypt`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecryptResponse {
    pub id: String,
    #[serde(rename = "partyId")]
    pub party_id: String,
    /// The recovered payload, exactly as it was submitted.
    pub payload: serde_json::Value,
}

// ---------------------------------------------------------------------------
// Error response
// ---------------------------------------------------------------------------

/// Standard error response body returned on any non-2xx status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Short machine-readable error code (e.g. `"decrypt_failed"`).
    pub code: String,
    /// Human-readable description safe to expose to callers.
    pub message: String,
}

impl ErrorResponse {
    /// Construct an [`ErrorResponse`] from a code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Health check
// ---------------------------------------------------------------------------

/// Response body for `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `"ok"` once the process is serving.
    pub status: String,
    /// Version of the master key new records are wrapped under.
    pub mk_version: u32,
    /// Number of records currently held by the store.
    pub records: usize,
}
