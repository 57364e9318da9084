//! Persistent slot holding the hex-encoded key.
//!
//! The codec never touches storage; callers read a key out of a [`KeySlot`],
//! hand it to [`crate::encrypt`]/[`crate::decrypt`], and write a new one on
//! regeneration.

use crate::SymmetricKey;
use crate::storage::Storage;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::path::PathBuf;
use tracing::{debug, warn};
use zeroize::Zeroizing;

/// A single string value under a fixed logical name.
pub trait KeySlot {
    /// Returns the stored hex key, or `None` if nothing has been stored yet.
    fn get(&self) -> Result<Option<String>>;

    /// Replaces the stored value.
    fn set(&self, hex: &str) -> Result<()>;
}

#[derive(Serialize, Deserialize)]
struct KeyDocument {
    #[serde(rename = "phoneEncryptionKey")]
    phone_encryption_key: String,
}

/// Key slot backed by a JSON file, written atomically.
#[derive(Clone, Debug)]
pub struct FileKeySlot {
    storage: Storage,
}

impl FileKeySlot {
    pub fn new(path: PathBuf) -> Self {
        Self {
            storage: Storage::new(path),
        }
    }

    pub fn path(&self) -> &std::path::Path {
        self.storage.path()
    }
}

impl KeySlot for FileKeySlot {
    fn get(&self) -> Result<Option<String>> {
        let Some(data) = self.storage.load()? else {
            return Ok(None);
        };
        let data = Zeroizing::new(data);

        let doc: KeyDocument = serde_json::from_slice(&data).with_context(|| {
            format!("failed to parse key file {}", self.storage.path().display())
        })?;
        Ok(Some(doc.phone_encryption_key))
    }

    fn set(&self, hex: &str) -> Result<()> {
        let doc = KeyDocument {
            phone_encryption_key: hex.to_string(),
        };
        let data = Zeroizing::new(serde_json::to_vec_pretty(&doc)?);
        drop(Zeroizing::new(doc.phone_encryption_key));

        self.storage
            .save(&data)
            .with_context(|| format!("failed to write key file {}", self.storage.path().display()))
    }
}

/// In-process key slot, for tests and embedding.
#[derive(Debug, Default)]
pub struct MemoryKeySlot {
    value: RefCell<Option<Zeroizing<String>>>,
}

impl MemoryKeySlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(hex: &str) -> Self {
        Self {
            value: RefCell::new(Some(Zeroizing::new(hex.to_string()))),
        }
    }
}

impl KeySlot for MemoryKeySlot {
    fn get(&self) -> Result<Option<String>> {
        Ok(self.value.borrow().as_ref().map(|v| v.as_str().to_owned()))
    }

    fn set(&self, hex: &str) -> Result<()> {
        *self.value.borrow_mut() = Some(Zeroizing::new(hex.to_string()));
        Ok(())
    }
}

/// Reads the key from `slot`, generating and storing one if the slot is empty.
///
/// A stored value that is not a valid key is an error; it is never replaced
/// silently.
pub fn load_or_generate(slot: &dyn KeySlot) -> Result<SymmetricKey> {
    match slot.get()? {
        Some(hex) => {
            let hex = Zeroizing::new(hex);
            let key = SymmetricKey::from_hex(&hex).context("stored encryption key is invalid")?;
            debug!("loaded encryption key from slot");
            Ok(key)
        }
        None => {
            let key = SymmetricKey::generate()?;
            slot.set(&key.to_hex())
                .context("failed to store new encryption key")?;
            debug!("generated new encryption key");
            Ok(key)
        }
    }
}

/// Generates a new key and overwrites the slot.
///
/// Tokens sealed under the previous key can no longer be decrypted.
pub fn regenerate(slot: &dyn KeySlot) -> Result<SymmetricKey> {
    let key = SymmetricKey::generate()?;
    slot.set(&key.to_hex())
        .context("failed to store new encryption key")?;
    warn!("encryption key regenerated; previously sealed tokens are unreadable");
    Ok(key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CodecError;
    use tempfile::tempdir;

    #[test]
    fn memory_slot_starts_empty() {
        assert!(MemoryKeySlot::new().get().unwrap().is_none());
    }

    #[test]
    fn load_or_generate_fills_empty_slot() {
        let slot = MemoryKeySlot::new();
        let key = load_or_generate(&slot).unwrap();

        let stored = slot.get().unwrap().unwrap();
        assert_eq!(stored.len(), 64);
        assert_eq!(stored, key.to_hex().as_str());
    }

    #[test]
    fn load_or_generate_reuses_stored_key() {
        let hex = "00".repeat(32);
        let slot = MemoryKeySlot::with_value(&hex);

        let key = load_or_generate(&slot).unwrap();
        assert_eq!(key.as_bytes(), &[0u8; 32]);
        assert_eq!(slot.get().unwrap().unwrap(), hex);
    }

    #[test]
    fn load_or_generate_rejects_corrupt_key() {
        let slot = MemoryKeySlot::with_value("not-a-key");

        let err = load_or_generate(&slot).unwrap_err();
        assert_eq!(
            err.downcast_ref::<CodecError>(),
            Some(&CodecError::InvalidKeyLength)
        );
        assert_eq!(slot.get().unwrap().unwrap(), "not-a-key");
    }

    #[test]
    fn regenerate_replaces_key() {
        let slot = MemoryKeySlot::with_value(&"00".repeat(32));

        let key = regenerate(&slot).unwrap();
        let stored = slot.get().unwrap().unwrap();
        assert_ne!(stored, "00".repeat(32));
        assert_eq!(stored, key.to_hex().as_str());
    }

    #[test]
    fn regenerated_key_cannot_open_old_tokens() {
        let slot = MemoryKeySlot::new();
        let old = load_or_generate(&slot).unwrap();
        let sealed = crate::encrypt("+15551234567", &old).unwrap();

        let new = regenerate(&slot).unwrap();
        assert_eq!(
            crate::decrypt(&sealed, &new),
            Err(CodecError::AuthenticationFailed)
        );
    }

    #[test]
    fn file_slot_missing_file_is_empty() {
        let dir = tempdir().unwrap();
        let slot = FileKeySlot::new(dir.path().join("key.json"));
        assert!(slot.get().unwrap().is_none());
    }

    #[test]
    fn file_slot_persists_across_instances() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("key.json");

        let key = load_or_generate(&FileKeySlot::new(path.clone())).unwrap();
        let again = load_or_generate(&FileKeySlot::new(path)).unwrap();
        assert_eq!(key, again);
    }

    #[test]
    fn file_slot_uses_fixed_field_name() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("key.json");
        let slot = FileKeySlot::new(path.clone());
        slot.set(&"ab".repeat(32)).unwrap();

        let json: serde_json::Value =
            serde_json::from_slice(&std::fs::read(path).unwrap()).unwrap();
        assert_eq!(json["phoneEncryptionKey"], "ab".repeat(32));
    }

    #[test]
    fn file_slot_rejects_garbage_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("key.json");
        std::fs::write(&path, b"{not json").unwrap();

        assert!(FileKeySlot::new(path).get().is_err());
    }
}
