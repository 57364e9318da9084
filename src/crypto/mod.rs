//! Cryptographic primitives for phone number tokens.
//!
//! Provides the key codec, the base64 text codec and AES-256-GCM sealing.

pub mod aead;
pub mod key;
pub mod text;

pub use aead::{decrypt, encrypt};
pub use key::SymmetricKey;

/// Length of the encryption key (32 bytes / 256 bits).
pub const KEY_LEN: usize = 32;
/// Length of the key in its hex form.
pub const KEY_HEX_LEN: usize = KEY_LEN * 2;
/// Length of the nonce (16 bytes, used as the GCM initialization vector).
pub const NONCE_LEN: usize = 16;
/// Length of the authentication tag (16 bytes / 128 bits).
pub const TAG_LEN: usize = 16;
/// Smallest decoded sealed message: nonce plus tag, empty ciphertext.
pub const MIN_SEALED_LEN: usize = NONCE_LEN + TAG_LEN;
