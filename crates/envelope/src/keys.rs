//! Key material: the process-scoped [`MasterKey`] and per-record [`Dek`]s.
//!
//! Both types zero their bytes on drop and never print them, not even in
//! `Debug` output. Neither implements `Serialize`.

use aes_gcm::aead::{rand_core::RngCore, OsRng};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::cipher::KEY_LEN;
use crate::codec::decode_hex;
use crate::error::{ensure_len, EnvelopeError};

/// The only master key version this build understands.
pub const MK_VERSION: u32 = 1;

/// Long-lived key-encryption key, created once at startup and passed by
/// reference into every envelope operation.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct MasterKey {
    bytes: [u8; KEY_LEN],
    #[zeroize(skip)]
    version: u32,
}

impl MasterKey {
    /// Build a master key from raw bytes, tagged with [`MK_VERSION`].
    ///
    /// # Errors
    ///
    /// Returns [`EnvelopeError::InvalidLength`] unless `bytes` is exactly
    /// [`KEY_LEN`] bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, EnvelopeError> {
        ensure_len(bytes, KEY_LEN, "master_key")?;
        let mut buf = [0u8; KEY_LEN];
        buf.copy_from_slice(bytes);
        Ok(Self {
            bytes: buf,
            version: MK_VERSION,
        })
    }

    /// Parse a 64-character hex master key.
    ///
    /// # Errors
    ///
    /// Returns [`EnvelopeError::InvalidHex`] on malformed hex and
    /// [`EnvelopeError::InvalidLength`] if it does not decode to 32 bytes.
    pub fn from_hex(hex: &str) -> Result<Self, EnvelopeError> {
        let mut decoded = decode_hex("master_key", hex)?;
        let key = Self::from_bytes(&decoded);
        decoded.zeroize();
        key
    }

    /// Version tag stamped into every record wrapped under this key.
    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl std::fmt::Debug for MasterKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MasterKey")
            .field("bytes", &"[REDACTED]")
            .field("version", &self.version)
            .finish()
    }
}

/// A per-record data encryption key.
///
/// Lives only for the duration of one encrypt or decrypt call.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct Dek([u8; KEY_LEN]);

impl Dek {
    /// Copy exactly [`KEY_LEN`] bytes into a new key.
    ///
    /// # Errors
    ///
    /// Returns [`EnvelopeError::InvalidLength`] on any other size.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, EnvelopeError> {
        ensure_len(bytes, KEY_LEN, "dek")?;
        let mut buf = [0u8; KEY_LEN];
        buf.copy_from_slice(bytes);
        Ok(Self(buf))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl std::fmt::Debug for Dek {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Dek([REDACTED])")
    }
}

/// Generate a fresh 32-byte DEK from the OS CSPRNG.
pub fn new_dek() -> Dek {
    let mut buf = [0u8; KEY_LEN];
    OsRng.fill_bytes(&mut buf);
    Dek(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MK_HEX: &str = "00112233445566778899aabbccddeeff00112233445566778899aabbccddeeff";

    #[test]
    fn master_key_from_hex() {
        let mk = MasterKey::from_hex(MK_HEX).unwrap();
        assert_eq!(mk.version(), MK_VERSION);
        assert_eq!(mk.as_bytes()[..4], [0x00, 0x11, 0x22, 0x33]);
        assert_eq!(mk.as_bytes().len(), KEY_LEN);
    }

    #[test]
    fn master_key_rejects_short_hex() {
        assert_eq!(
            MasterKey::from_hex("0011").unwrap_err(),
            EnvelopeError::InvalidLength {
                field: "master_key",
                expected: KEY_LEN
            }
        );
    }

    #[test]
    fn master_key_rejects_bad_hex() {
        let bad = MK_HEX.replace('a', "z");
        assert!(matches!(
            MasterKey::from_hex(&bad),
            Err(EnvelopeError::InvalidHex { field: "master_key", .. })
        ));
    }

    #[test]
    fn master_key_redacted_in_debug() {
        let mk = MasterKey::from_bytes(&[0xAB; KEY_LEN]).unwrap();
        let dbg = format!("{mk:?}");
        assert!(dbg.contains("REDACTED"));
        assert!(!dbg.contains("171"));
        assert!(!dbg.to_lowercase().contains("abab"));
    }

    #[test]
    fn dek_redacted_in_debug() {
        let dek = Dek::from_slice(&[0xFF; KEY_LEN]).unwrap();
        assert_eq!(format!("{dek:?}"), "Dek([REDACTED])");
    }

    #[test]
    fn dek_rejects_wrong_length() {
        assert!(Dek::from_slice(&[0u8; 16]).is_err());
        assert!(Dek::from_slice(&[0u8; 33]).is_err());
    }

    #[test]
    fn new_deks_are_independent() {
        let a = new_dek();
        let b = new_dek();
        assert_eq!(a.as_bytes().len(), KEY_LEN);
        assert_ne!(a.as_bytes(), b.as_bytes());
    }

    #[test]
    fn zeroize_clears_dek() {
        let mut dek = Dek::from_slice(&[0x42; KEY_LEN]).unwrap();
        dek.zeroize();
        assert_eq!(dek.as_bytes(), &[0u8; KEY_LEN]);
    }
}
