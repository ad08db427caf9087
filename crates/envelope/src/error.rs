//! Failure taxonomy for the envelope core.
//!
//! Callers can tell three classes apart:
//! - structural ([`EnvelopeError::InvalidHex`], [`EnvelopeError::InvalidLength`]),
//! - integrity ([`EnvelopeError::DecryptFailed`]),
//! - compatibility ([`EnvelopeError::UnsupportedAlg`], [`EnvelopeError::UnsupportedMkVersion`]).
//!
//! Messages name the offending field but never carry key material or the
//! bytes that failed validation.

use thiserror::Error;

/// Errors produced by the codec, cipher and envelope layers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnvelopeError {
    /// A hex string was malformed (odd length or a character outside `[0-9a-fA-F]`).
    #[error("invalid hex in {field}: {reason}")]
    InvalidHex {
        field: &'static str,
        reason: &'static str,
    },

    /// A byte buffer did not have its fixed expected size.
    #[error("invalid length: {field} must be {expected} bytes")]
    InvalidLength {
        field: &'static str,
        expected: usize,
    },

    /// Authentication failed, or authenticated plaintext did not reparse.
    ///
    /// The two causes are intentionally reported identically.
    #[error("decrypt failed")]
    DecryptFailed,

    /// The record declares an algorithm this build does not implement.
    #[error("unsupported algorithm: {0}")]
    UnsupportedAlg(String),

    /// The record was wrapped under a master key version other than the one supplied.
    #[error("unsupported master key version: {0}")]
    UnsupportedMkVersion(u32),

    /// The payload value could not be serialised to its canonical text form.
    #[error("payload is not serialisable")]
    InvalidPayload,
}

impl EnvelopeError {
    /// Stable, machine-readable code for this error kind.
    pub fn code(&self) -> &'static str {
        match self {
            EnvelopeError::InvalidHex { .. } => "invalid_hex",
            EnvelopeError::InvalidLength { .. } => "invalid_length",
            EnvelopeError::DecryptFailed => "decrypt_failed",
            EnvelopeError::UnsupportedAlg(_) => "unsupported_alg",
            EnvelopeError::UnsupportedMkVersion(_) => "unsupported_mk_version",
            EnvelopeError::InvalidPayload => "invalid_payload",
        }
    }

    pub(crate) fn length(field: &'static str, expected: usize) -> Self {
        EnvelopeError::InvalidLength { field, expected }
    }
}

/// Fail with [`EnvelopeError::InvalidLength`] unless `bytes` is exactly `expected` long.
pub fn ensure_len(bytes: &[u8], expected: usize, field: &'static str) -> Result<(), EnvelopeError> {
    if bytes.len() != expected {
        return Err(EnvelopeError::length(field, expected));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_stable() {
        assert_eq!(
            EnvelopeError::InvalidHex { field: "x", reason: "odd length" }.code(),
            "invalid_hex"
        );
        assert_eq!(EnvelopeError::length("x", 12).code(), "invalid_length");
        assert_eq!(EnvelopeError::DecryptFailed.code(), "decrypt_failed");
        assert_eq!(
            EnvelopeError::UnsupportedAlg("ROT13".into()).code(),
            "unsupported_alg"
        );
        assert_eq!(
            EnvelopeError::UnsupportedMkVersion(2).code(),
            "unsupported_mk_version"
        );
        assert_eq!(EnvelopeError::InvalidPayload.code(), "invalid_payload");
    }

    #[test]
    fn length_message_names_field() {
        let msg = EnvelopeError::length("payload_nonce", 12).to_string();
        assert_eq!(msg, "invalid length: payload_nonce must be 12 bytes");
    }

    #[test]
    fn ensure_len_accepts_exact_size_only() {
        assert!(ensure_len(&[0u8; 16], 16, "tag").is_ok());
        assert_eq!(
            ensure_len(&[0u8; 15], 16, "tag"),
            Err(EnvelopeError::length("tag", 16))
        );
        assert!(ensure_len(&[0u8; 17], 16, "tag").is_err());
    }
}
