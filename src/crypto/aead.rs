//! AES-256-GCM sealing of phone numbers.
//!
//! Sealed text format:
//! ```text
//! base64( NONCE (16) | CIPHERTEXT (n) | TAG (16) )
//! ```
//! `n` is the UTF-8 length of the plaintext. No associated data is used.

use super::{MIN_SEALED_LEN, NONCE_LEN, SymmetricKey, text};
use crate::error::CodecError;
use aes_gcm::{
    AesGcm,
    aead::{Aead, KeyInit, consts::U16, generic_array::GenericArray},
    aes::Aes256,
};
use getrandom::fill;
use tracing::debug;
use zeroize::Zeroizing;

/// AES-256-GCM with a 128-bit nonce and 128-bit tag.
type Aes256Gcm16 = AesGcm<Aes256, U16>;

/// Fill buffer with cryptographically secure random bytes
pub(crate) fn secure_random(buf: &mut [u8]) -> Result<(), CodecError> {
    fill(buf).map_err(|_| CodecError::RandomUnavailable)
}

fn cipher(key: &SymmetricKey) -> Aes256Gcm16 {
    Aes256Gcm16::new(GenericArray::from_slice(key.as_bytes()))
}

/// Encrypts `plaintext` under a fresh random nonce and returns the sealed text.
///
/// # Errors
///
/// [`CodecError::EmptyInput`] for an empty plaintext,
/// [`CodecError::RandomUnavailable`] if no nonce could be drawn.
pub fn encrypt(plaintext: &str, key: &SymmetricKey) -> Result<String, CodecError> {
    if plaintext.is_empty() {
        return Err(CodecError::EmptyInput);
    }

    let mut nonce = [0u8; NONCE_LEN];
    secure_random(&mut nonce)?;

    let sealed = cipher(key)
        .encrypt(GenericArray::from_slice(&nonce), plaintext.as_bytes())
        .map_err(|_| CodecError::EncryptionFailed)?;

    let mut framed = Vec::with_capacity(NONCE_LEN + sealed.len());
    framed.extend_from_slice(&nonce);
    framed.extend_from_slice(&sealed);

    debug!(
        plaintext_len = plaintext.len(),
        sealed_len = framed.len(),
        "sealed message"
    );
    Ok(text::encode(&framed))
}

/// Verifies and decrypts a sealed text.
///
/// Nothing is returned unless the tag verifies.
///
/// # Errors
///
/// [`CodecError::MalformedCiphertext`] if the text is not base64 or is shorter
/// than nonce plus tag, [`CodecError::AuthenticationFailed`] if the tag does not
/// verify, [`CodecError::InvalidUtf8`] if the verified bytes are not UTF-8.
pub fn decrypt(sealed_text: &str, key: &SymmetricKey) -> Result<String, CodecError> {
    let framed = text::decode(sealed_text).map_err(|_| CodecError::MalformedCiphertext)?;
    if framed.len() < MIN_SEALED_LEN {
        debug!(len = framed.len(), "sealed message too short");
        return Err(CodecError::MalformedCiphertext);
    }

    let (nonce, sealed) = framed.split_at(NONCE_LEN);

    let plaintext = cipher(key)
        .decrypt(GenericArray::from_slice(nonce), sealed)
        .map(Zeroizing::new)
        .map_err(|_| {
            debug!(len = framed.len(), "sealed message failed verification");
            CodecError::AuthenticationFailed
        })?;

    let plaintext = std::str::from_utf8(&plaintext).map_err(|_| CodecError::InvalidUtf8)?;
    Ok(plaintext.to_owned())
}
