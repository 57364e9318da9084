//! Reversible, authenticated tokens for phone numbers.
//!
//! A phone number is sealed with AES-256-GCM under a locally held 256-bit key
//! and a fresh 16-byte nonce, and framed as `base64(nonce | ciphertext | tag)`.
//!
//! ```no_run
//! use phonevault::{SymmetricKey, decrypt, encrypt};
//!
//! let key = SymmetricKey::generate()?;
//! let token = encrypt("+15551234567", &key)?;
//! assert_eq!(decrypt(&token, &key)?, "+15551234567");
//! # Ok::<(), phonevault::CodecError>(())
//! ```

mod crypto;
mod error;
mod key_store;
mod storage;

pub use crate::crypto::{SymmetricKey, decrypt, encrypt, text};
pub use crate::error::CodecError;
pub use crate::key_store::{FileKeySlot, KeySlot, MemoryKeySlot, load_or_generate, regenerate};
use anyhow::{Context, Result};
use directories::ProjectDirs;

/// The key slot in the platform data directory.
pub fn default_key_slot() -> Result<FileKeySlot> {
    let project_dirs = ProjectDirs::from("", "", "phonevault")
        .context("could not determine platform directories")?;

    let path = project_dirs.data_dir().join("key.json");

    Ok(FileKeySlot::new(path))
}
