//! 256-bit symmetric key and its hex representation.

use super::{KEY_HEX_LEN, KEY_LEN, aead::secure_random};
use crate::error::CodecError;
use std::{fmt, str::FromStr};
use zeroize::{Zeroize, Zeroizing};

/// A 256-bit AES key.
///
/// Externally a key is 64 hex characters; the raw bytes are wiped on drop.
#[derive(Clone, PartialEq, Eq)]
pub struct SymmetricKey {
    bytes: [u8; KEY_LEN],
}

impl Drop for SymmetricKey {
    fn drop(&mut self) {
        self.bytes.zeroize();
    }
}

impl fmt::Debug for SymmetricKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SymmetricKey")
            .field("bytes", &"[REDACTED]")
            .finish()
    }
}

impl SymmetricKey {
    /// Wraps raw key bytes.
    pub fn from_bytes(bytes: [u8; KEY_LEN]) -> Self {
        Self { bytes }
    }

    /// Generates a fresh key from the OS random generator.
    pub fn generate() -> Result<Self, CodecError> {
        let mut bytes = [0u8; KEY_LEN];
        secure_random(&mut bytes)?;
        Ok(Self { bytes })
    }

    /// Parses a key from exactly 64 hex characters (either case).
    ///
    /// # Errors
    ///
    /// [`CodecError::InvalidKeyLength`] if the string is not 64 characters long,
    /// [`CodecError::InvalidKeyEncoding`] if any pair is not a hex byte.
    pub fn from_hex(hex: &str) -> Result<Self, CodecError> {
        if hex.chars().count() != KEY_HEX_LEN {
            return Err(CodecError::InvalidKeyLength);
        }

        let mut bytes = [0u8; KEY_LEN];
        if hex::decode_to_slice(hex, &mut bytes).is_err() {
            bytes.zeroize();
            return Err(CodecError::InvalidKeyEncoding);
        }

        Ok(Self { bytes })
    }

    /// Lowercase, zero-padded hex form of the key.
    pub fn to_hex(&self) -> Zeroizing<String> {
        Zeroizing::new(hex::encode(self.bytes))
    }

    /// Returns the raw key bytes.
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.bytes
    }
}

impl FromStr for SymmetricKey {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}
