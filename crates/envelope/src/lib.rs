//! Envelope encryption for transaction payloads.
//!
//! Each payload is sealed with AES-256-GCM under a fresh data encryption key
//! (DEK); the DEK is then sealed under a long-lived [`MasterKey`]. A stored
//! record carries both sealed units as lowercase hex:
//!
//! ```text
//! payload_nonce | payload_ct | payload_tag       <- payload under DEK
//! dek_wrap_nonce | dek_wrapped | dek_wrap_tag    <- DEK under master key
//! alg = "AES-256-GCM", mk_version = 1
//! ```
//!
//! Everything here is synchronous and free of I/O. Transport, persistence,
//! identifiers and timestamps belong to the caller.
//!
//! ```
//! use envelope::{build_record_fields, decrypt_record, MasterKey};
//! use serde_json::{json, Value};
//!
//! let mk = MasterKey::from_hex(
//!     "00112233445566778899aabbccddeeff00112233445566778899aabbccddeeff",
//! ).unwrap();
//! let fields = build_record_fields("party_123", &json!({"amount": 100}), &mk).unwrap();
//! let payload: Value = decrypt_record(&fields, &mk).unwrap();
//! assert_eq!(payload["amount"], 100);
//! ```

pub mod cipher;
pub mod codec;
pub mod envelope;
pub mod error;
pub mod keys;
pub mod record;

pub use cipher::{SealedBox, KEY_LEN, NONCE_LEN, TAG_LEN};
pub use codec::{bytes_to_hex, decode_hex_exact, hex_to_bytes, is_hex};
pub use envelope::{
    build_record_fields, decrypt_payload_with_dek, decrypt_record, encrypt_payload_with_dek,
    unwrap_dek_with_master_key, wrap_dek_with_master_key,
};
pub use error::EnvelopeError;
pub use keys::{new_dek, Dek, MasterKey, MK_VERSION};
pub use record::{RecordFields, TxSecureRecord, ALG};
