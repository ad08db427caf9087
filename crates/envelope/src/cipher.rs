//! AES-256-GCM encryption and decryption of raw byte buffers.
//!
//! Every call to [`encrypt`] draws a fresh 96-bit nonce from the OS CSPRNG.
//! Callers never supply a nonce. GCM nonce reuse under one key breaks both
//! confidentiality and authentication.

use aes_gcm::{
    aead::{rand_core::RngCore, AeadInPlace, KeyInit, OsRng},
    Aes256Gcm, Nonce, Tag,
};

use crate::error::{ensure_len, EnvelopeError};

/// Byte length of an AES-256 key (32 bytes = 256 bits).
pub const KEY_LEN: usize = 32;

/// Byte length of an AES-GCM nonce (12 bytes = 96 bits).
pub const NONCE_LEN: usize = 12;

/// Byte length of an AES-GCM authentication tag (16 bytes = 128 bits).
pub const TAG_LEN: usize = 16;

/// The result of one AES-256-GCM operation.
///
/// `ciphertext` has the same length as the plaintext; the tag is kept
/// separately rather than appended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SealedBox {
    /// Random nonce, [`NONCE_LEN`] bytes.
    pub nonce: Vec<u8>,
    /// Ciphertext without padding.
    pub ciphertext: Vec<u8>,
    /// Authentication tag, [`TAG_LEN`] bytes.
    pub tag: Vec<u8>,
}

/// Encrypt `plaintext` under `key` with a freshly generated nonce.
///
/// # Errors
///
/// Returns [`EnvelopeError::InvalidLength`] if `key` is not [`KEY_LEN`] bytes.
pub fn encrypt(key: &[u8], plaintext: &[u8]) -> Result<SealedBox, EnvelopeError> {
    let cipher = build_cipher(key)?;

    let mut nonce_bytes = [0u8; NONCE_LEN];
    OsRng.fill_bytes(&mut nonce_bytes);

    let mut buffer = plaintext.to_vec();
    let tag = cipher
        .encrypt_in_place_detached(Nonce::from_slice(&nonce_bytes), b"", &mut buffer)
        // Only reachable for plaintexts beyond the GCM length limit (~64 GiB).
        .map_err(|_| EnvelopeError::InvalidPayload)?;

    Ok(SealedBox {
        nonce: nonce_bytes.to_vec(),
        ciphertext: buffer,
        tag: tag.to_vec(),
    })
}

/// Decrypt a [`SealedBox`] back to plaintext bytes.
///
/// All lengths are checked before the cipher runs.
///
/// # Errors
///
/// Returns [`EnvelopeError::InvalidLength`] if `key`, `nonce` or `tag` has the
/// wrong size, and [`EnvelopeError::DecryptFailed`] if authentication fails
/// (tampered ciphertext, tampered tag or wrong key, indistinguishably).
pub fn decrypt(key: &[u8], sealed: &SealedBox) -> Result<Vec<u8>, EnvelopeError> {
    let cipher = build_cipher(key)?;
    ensure_len(&sealed.nonce, NONCE_LEN, "nonce")?;
    ensure_len(&sealed.tag, TAG_LEN, "tag")?;

    let mut buffer = sealed.ciphertext.clone();
    cipher
        .decrypt_in_place_detached(
            Nonce::from_slice(&sealed.nonce),
            b"",
            &mut buffer,
            Tag::from_slice(&sealed.tag),
        )
        .map_err(|_| EnvelopeError::DecryptFailed)?;
    Ok(buffer)
}

fn build_cipher(key: &[u8]) -> Result<Aes256Gcm, EnvelopeError> {
    ensure_len(key, KEY_LEN, "key")?;
    Aes256Gcm::new_from_slice(key).map_err(|_| EnvelopeError::length("key", KEY_LEN))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn random_key() -> Vec<u8> {
        let mut key = vec![0u8; KEY_LEN];
        OsRng.fill_bytes(&mut key);
        key
    }

    #[test]
    fn encrypt_decrypt_round_trip() {
        let key = random_key();
        let plaintext = b"{\"amount\":100}";
        let sealed = encrypt(&key, plaintext).unwrap();
        assert_eq!(sealed.nonce.len(), NONCE_LEN);
        assert_eq!(sealed.tag.len(), TAG_LEN);
        assert_eq!(sealed.ciphertext.len(), plaintext.len());
        assert_eq!(decrypt(&key, &sealed).unwrap(), plaintext);
    }

    #[test]
    fn empty_plaintext_round_trips() {
        let key = random_key();
        let sealed = encrypt(&key, b"").unwrap();
        assert!(sealed.ciphertext.is_empty());
        assert!(decrypt(&key, &sealed).unwrap().is_empty());
    }

    #[test]
    fn fresh_nonce_per_call() {
        let key = random_key();
        let a = encrypt(&key, b"same").unwrap();
        let b = encrypt(&key, b"same").unwrap();
        assert_ne!(a.nonce, b.nonce);
        assert_ne!(a.ciphertext, b.ciphertext);
    }

    #[test]
    fn wrong_key_fails_decryption() {
        let sealed = encrypt(&random_key(), b"secret").unwrap();
        assert_eq!(
            decrypt(&random_key(), &sealed),
            Err(EnvelopeError::DecryptFailed)
        );
    }

    #[test]
    fn invalid_key_length_rejected() {
        assert_eq!(
            encrypt(&[0u8; 16], b"x"),
            Err(EnvelopeError::InvalidLength {
                field: "key",
                expected: KEY_LEN
            })
        );
        let sealed = encrypt(&random_key(), b"x").unwrap();
        assert!(matches!(
            decrypt(&[0u8; 31], &sealed),
            Err(EnvelopeError::InvalidLength { field: "key", .. })
        ));
    }

    #[test]
    fn nonce_and_tag_lengths_checked_before_cipher() {
        let key = random_key();
        let sealed = encrypt(&key, b"x").unwrap();

        let mut short_nonce = sealed.clone();
        short_nonce.nonce.truncate(11);
        assert_eq!(
            decrypt(&key, &short_nonce),
            Err(EnvelopeError::InvalidLength {
                field: "nonce",
                expected: NONCE_LEN
            })
        );

        let mut long_tag = sealed;
        long_tag.tag.push(0);
        assert_eq!(
            decrypt(&key, &long_tag),
            Err(EnvelopeError::InvalidLength {
                field: "tag",
                expected: TAG_LEN
            })
        );
    }

    #[test]
    fn tampered_ciphertext_fails_auth() {
        let key = random_key();
        let mut sealed = encrypt(&key, b"tamper me").unwrap();
        sealed.ciphertext[0] ^= 0x01;
        assert_eq!(decrypt(&key, &sealed), Err(EnvelopeError::DecryptFailed));
    }

    #[test]
    fn tampered_tag_fails_auth() {
        let key = random_key();
        let mut sealed = encrypt(&key, b"tamper me").unwrap();
        sealed.tag[15] ^= 0x80;
        assert_eq!(decrypt(&key, &sealed), Err(EnvelopeError::DecryptFailed));
    }

    #[test]
    fn tampered_nonce_fails_auth() {
        let key = random_key();
        let mut sealed = encrypt(&key, b"tamper me").unwrap();
        sealed.nonce[0] ^= 0x01;
        assert_eq!(decrypt(&key, &sealed), Err(EnvelopeError::DecryptFailed));
    }
}
