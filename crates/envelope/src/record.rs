//! The flat, hex-encoded field set handed to the storage layer.

use serde::{Deserialize, Serialize};

/// Algorithm identifier stamped on every record.
pub const ALG: &str = "AES-256-GCM";

/// Fields produced by one call to [`build_record_fields`](crate::build_record_fields).
///
/// Every binary value is lowercase hex. The set is immutable once produced;
/// stores replace it whole, never field by field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordFields {
    #[serde(rename = "partyId")]
    pub party_id: String,
    pub payload_nonce: String,
    pub payload_ct: String,
    pub payload_tag: String,
    pub dek_wrap_nonce: String,
    pub dek_wrapped: String,
    pub dek_wrap_tag: String,
    pub alg: String,
    pub mk_version: u32,
}

/// A persisted transaction record: caller-supplied identity plus [`RecordFields`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxSecureRecord {
    pub id: String,
    #[serde(rename = "createdAt")]
    pub created_at: String,
    #[serde(flatten)]
    pub fields: RecordFields,
}

impl TxSecureRecord {
    pub fn new(id: impl Into<String>, created_at: impl Into<String>, fields: RecordFields) -> Self {
        Self {
            id: id.into(),
            created_at: created_at.into(),
            fields,
        }
    }
}
