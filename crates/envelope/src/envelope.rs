//! Envelope protocol: payloads sealed under a per-record DEK, the DEK sealed
//! under the master key.
//!
//! Both directions are single-shot and stateless. Key material created or
//! recovered here is dropped (and zeroed) before the call returns.

use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;
use zeroize::Zeroizing;

use crate::cipher::{self, SealedBox, KEY_LEN, NONCE_LEN, TAG_LEN};
use crate::codec::{bytes_to_hex, decode_hex};
use crate::error::{ensure_len, EnvelopeError};
use crate::keys::{new_dek, Dek, MasterKey};
use crate::record::{RecordFields, ALG};

/// Serialise `payload` to compact JSON and seal it under `dek`.
///
/// # Errors
///
/// Returns [`EnvelopeError::InvalidLength`] if `dek` is not 32 bytes and
/// [`EnvelopeError::InvalidPayload`] if `payload` cannot be serialised.
pub fn encrypt_payload_with_dek<T>(payload: &T, dek: &[u8]) -> Result<SealedBox, EnvelopeError>
where
    T: Serialize + ?Sized,
{
    ensure_len(dek, KEY_LEN, "dek")?;
    let text = serde_json::to_vec(payload).map_err(|_| EnvelopeError::InvalidPayload)?;
    cipher::encrypt(dek, &text)
}

/// Open a payload sealed by [`encrypt_payload_with_dek`].
///
/// Plaintext that authenticates but does not parse as `T` is reported as
/// [`EnvelopeError::DecryptFailed`], the same as a forged ciphertext.
///
/// # Errors
///
/// Returns [`EnvelopeError::InvalidLength`] on a bad `dek`, nonce or tag size
/// and [`EnvelopeError::DecryptFailed`] on authentication or parse failure.
pub fn decrypt_payload_with_dek<T>(sealed: &SealedBox, dek: &[u8]) -> Result<T, EnvelopeError>
where
    T: DeserializeOwned,
{
    ensure_len(dek, KEY_LEN, "dek")?;
    ensure_len(&sealed.nonce, NONCE_LEN, "payload_nonce")?;
    ensure_len(&sealed.tag, TAG_LEN, "payload_tag")?;
    let plaintext = cipher::decrypt(dek, sealed)?;
    serde_json::from_slice(&plaintext).map_err(|_| EnvelopeError::DecryptFailed)
}

/// Seal `dek` under the master key bytes `mk`.
///
/// # Errors
///
/// Returns [`EnvelopeError::InvalidLength`] if `dek` or `mk` is not 32 bytes.
pub fn wrap_dek_with_master_key(dek: &[u8], mk: &[u8]) -> Result<SealedBox, EnvelopeError> {
    ensure_len(dek, KEY_LEN, "dek")?;
    ensure_len(mk, KEY_LEN, "master_key")?;
    cipher::encrypt(mk, dek)
}

/// Recover a DEK sealed by [`wrap_dek_with_master_key`].
///
/// # Errors
///
/// Returns [`EnvelopeError::InvalidLength`] on a bad `mk`, nonce or tag size,
/// [`EnvelopeError::DecryptFailed`] on authentication failure, and
/// [`EnvelopeError::InvalidLength`] if the recovered key is not 32 bytes.
pub fn unwrap_dek_with_master_key(sealed: &SealedBox, mk: &[u8]) -> Result<Dek, EnvelopeError> {
    ensure_len(mk, KEY_LEN, "master_key")?;
    ensure_len(&sealed.nonce, NONCE_LEN, "dek_wrap_nonce")?;
    ensure_len(&sealed.tag, TAG_LEN, "dek_wrap_tag")?;
    let plaintext = Zeroizing::new(cipher::decrypt(mk, sealed)?);
    Dek::from_slice(&plaintext)
}

/// Encrypt `payload` for `party_id` and produce the complete storable field set.
///
/// A fresh DEK is generated, used once, wrapped under `master_key` and then
/// dropped. Either every field is produced or none is.
///
/// # Errors
///
/// Returns [`EnvelopeError::InvalidPayload`] if `payload` cannot be
/// serialised. Other failures indicate a broken key invariant.
pub fn build_record_fields<T>(
    party_id: &str,
    payload: &T,
    master_key: &MasterKey,
) -> Result<RecordFields, EnvelopeError>
where
    T: Serialize + ?Sized,
{
    let dek = new_dek();
    let payload_box = encrypt_payload_with_dek(payload, dek.as_bytes())?;
    let wrapped = wrap_dek_with_master_key(dek.as_bytes(), master_key.as_bytes())?;
    drop(dek);

    Ok(RecordFields {
        party_id: party_id.to_owned(),
        payload_nonce: bytes_to_hex(&payload_box.nonce),
        payload_ct: bytes_to_hex(&payload_box.ciphertext),
        payload_tag: bytes_to_hex(&payload_box.tag),
        dek_wrap_nonce: bytes_to_hex(&wrapped.nonce),
        dek_wrapped: bytes_to_hex(&wrapped.ciphertext),
        dek_wrap_tag: bytes_to_hex(&wrapped.tag),
        alg: ALG.to_owned(),
        mk_version: master_key.version(),
    })
}

/// Recover the payload of a stored record.
///
/// Checks run in a fixed order: algorithm, key version, the payload unit (hex,
/// then nonce and tag lengths), the wrapped-DEK unit (likewise), DEK unwrap,
/// payload decrypt.
///
/// # Errors
///
/// Returns [`EnvelopeError::UnsupportedAlg`] / [`EnvelopeError::UnsupportedMkVersion`]
/// for records this key cannot open, [`EnvelopeError::InvalidHex`] /
/// [`EnvelopeError::InvalidLength`] for structurally corrupt fields, and
/// [`EnvelopeError::DecryptFailed`] for tampering or a wrong key.
pub fn decrypt_record<T>(record: &RecordFields, master_key: &MasterKey) -> Result<T, EnvelopeError>
where
    T: DeserializeOwned,
{
    if record.alg != ALG {
        debug!(alg = %record.alg, "record declares unsupported algorithm");
        return Err(EnvelopeError::UnsupportedAlg(record.alg.clone()));
    }
    if record.mk_version != master_key.version() {
        debug!(
            record_version = record.mk_version,
            key_version = master_key.version(),
            "record wrapped under a different master key version"
        );
        return Err(EnvelopeError::UnsupportedMkVersion(record.mk_version));
    }

    let payload_box = decode_unit(
        ("payload_nonce", record.payload_nonce.as_str()),
        ("payload_ct", record.payload_ct.as_str()),
        ("payload_tag", record.payload_tag.as_str()),
    )?;
    let wrapped = decode_unit(
        ("dek_wrap_nonce", record.dek_wrap_nonce.as_str()),
        ("dek_wrapped", record.dek_wrapped.as_str()),
        ("dek_wrap_tag", record.dek_wrap_tag.as_str()),
    )?;

    let dek = unwrap_dek_with_master_key(&wrapped, master_key.as_bytes())?;
    decrypt_payload_with_dek(&payload_box, dek.as_bytes())
}

/// Hex-decode one sealed unit and check its nonce and tag sizes.
///
/// Nonce and tag are decoded first, then ciphertext; lengths are checked only
/// once all three decode.
fn decode_unit(
    nonce: (&'static str, &str),
    ciphertext: (&'static str, &str),
    tag: (&'static str, &str),
) -> Result<SealedBox, EnvelopeError> {
    let unit = SealedBox {
        nonce: decode_hex(nonce.0, nonce.1)?,
        tag: decode_hex(tag.0, tag.1)?,
        ciphertext: decode_hex(ciphertext.0, ciphertext.1)?,
    };
    ensure_len(&unit.nonce, NONCE_LEN, nonce.0)?;
    ensure_len(&unit.tag, TAG_LEN, tag.0)?;
    Ok(unit)
}
