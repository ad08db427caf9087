//! Strict lowercase hex codec used for every binary field at the storage boundary.

use crate::error::{ensure_len, EnvelopeError};

/// Encode `bytes` as lowercase hex, two characters per byte.
pub fn bytes_to_hex(bytes: &[u8]) -> String {
    ::hex::encode(bytes)
}

/// Returns `true` if every character of `s` is in `[0-9a-fA-F]`.
///
/// The empty string is hex-valid.
pub fn is_hex(s: &str) -> bool {
    s.bytes().all(|b| b.is_ascii_hexdigit())
}

/// Decode a hex string into bytes, most-significant nibble first.
///
/// # Errors
///
/// Returns [`EnvelopeError::InvalidHex`] on odd length or non-hex characters.
pub fn hex_to_bytes(hex: &str) -> Result<Vec<u8>, EnvelopeError> {
    decode_hex("hex", hex)
}

/// Decode the hex value of a named field.
///
/// # Errors
///
/// Returns [`EnvelopeError::InvalidHex`] carrying `field` on malformed input.
pub fn decode_hex(field: &'static str, hex: &str) -> Result<Vec<u8>, EnvelopeError> {
    if hex.len() % 2 != 0 {
        return Err(EnvelopeError::InvalidHex {
            field,
            reason: "odd length",
        });
    }
    if !is_hex(hex) {
        return Err(EnvelopeError::InvalidHex {
            field,
            reason: "non-hex characters",
        });
    }
    ::hex::decode(hex).map_err(|_| EnvelopeError::InvalidHex {
        field,
        reason: "non-hex characters",
    })
}

/// Decode the hex value of a named field and require exactly `len` bytes.
///
/// # Errors
///
/// Returns [`EnvelopeError::InvalidHex`] on malformed input, then
/// [`EnvelopeError::InvalidLength`] if the decoded size differs from `len`.
pub fn decode_hex_exact(
    field: &'static str,
    hex: &str,
    len: usize,
) -> Result<Vec<u8>, EnvelopeError> {
    let bytes = decode_hex(field, hex)?;
    ensure_len(&bytes, len, field)?;
    Ok(bytes)
}
