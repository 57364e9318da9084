//! Crash-safe single-file persistence used by the key slot.

use anyhow::{Context, Result};
use getrandom::fill;
use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// A file on disk that is always replaced whole, never edited in place.
#[derive(Clone, Debug)]
pub struct Storage {
    path: PathBuf,
}

impl Storage {
    /// Creates a new Storage for the given path.
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Reads the whole file, or `None` if it has never been written.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read.
    pub fn load(&self) -> Result<Option<Vec<u8>>> {
        match fs::read(&self.path) {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => {
                Err(e).with_context(|| format!("failed to read {}", self.path.display()))
            }
        }
    }

    /// Replaces the file contents atomically.
    ///
    /// Data goes to a fresh temp file in the same directory, is synced, then
    /// renamed over the target and the directory is synced. A crash leaves
    /// either the old or the new contents. Parent directories are created.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save(&self, data: &[u8]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }

        let tmp_path = self.random_tmp_path()?;

        let tmp_file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&tmp_path)
            .context("failed to create temporary file")?;

        // temp file must not outlive a failed save
        let written = write_synced(tmp_file, data).and_then(|()| self.atomic_replace(&tmp_path));
        if let Err(e) = written {
            let _ = fs::remove_file(&tmp_path);
            return Err(e);
        }

        // fsync directory
        if let Some(parent) = self.path.parent() {
            let dir = File::open(parent)?;
            dir.sync_all()?;
        }

        debug!(path = %self.path.display(), len = data.len(), "storage saved");
        Ok(())
    }

    /// Returns the path to the storage file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `<file name>.tmp.<16 random hex chars>` next to the target.
    fn random_tmp_path(&self) -> Result<PathBuf> {
        let mut buf = [0u8; 8];
        fill(&mut buf).context("OS random generator unavailable")?;

        let file_name = self
            .path
            .file_name()
            .context("storage path has no file name")?
            .to_string_lossy();

        let tmp_name = format!("{}.tmp.{}", file_name, hex::encode(buf));

        Ok(self.path.with_file_name(tmp_name))
    }

    /// Replaces the target with `ReplaceFileW` and write-through.
    #[cfg(target_os = "windows")]
    fn atomic_replace(&self, tmp_path: &Path) -> Result<()> {
        use std::ffi::OsStr;
        use std::os::windows::ffi::OsStrExt;
        use windows_sys::Win32::Storage::FileSystem::{REPLACEFILE_WRITE_THROUGH, ReplaceFileW};

        fn to_wide(s: &OsStr) -> Vec<u16> {
            s.encode_wide().chain(std::iter::once(0)).collect()
        }

        // ReplaceFileW needs an existing target.
        if !self.path.exists() {
            fs::rename(tmp_path, &self.path)?;
            return Ok(());
        }

        let target_w = to_wide(self.path.as_os_str());
        let tmp_w = to_wide(tmp_path.as_os_str());

        // SAFETY:
        // - Strings are valid UTF-16 and null-terminated
        // - Pointers remain valid during the call
        // - Windows does not retain the pointers after return
        let result = unsafe {
            ReplaceFileW(
                target_w.as_ptr(),
                tmp_w.as_ptr(),
                std::ptr::null(),
                REPLACEFILE_WRITE_THROUGH,
                std::ptr::null(),
                std::ptr::null(),
            )
        };

        if result == 0 {
            let err = std::io::Error::last_os_error();
            return Err(err).context("atomic replace failed");
        }

        Ok(())
    }

    #[cfg(not(target_os = "windows"))]
    fn atomic_replace(&self, tmp_path: &Path) -> Result<()> {
        fs::rename(tmp_path, &self.path).context("atomic replace failed")?;
        Ok(())
    }
}

/// Writes `data` and fsyncs before the file is closed.
fn write_synced(mut file: File, data: &[u8]) -> Result<()> {
    file.write_all(data).context("failed to write temporary file")?;
    file.sync_all().context("failed to sync temporary file")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn load_returns_written_data() {
        let dir = tempdir().unwrap();
        let storage = Storage::new(dir.path().join("key.json"));

        storage.save(b"hello world").unwrap();
        assert_eq!(storage.load().unwrap().unwrap(), b"hello world");
    }

    #[test]
    fn load_missing_file_is_none() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing.json");
        let storage = Storage::new(path.clone());

        assert!(storage.load().unwrap().is_none());
        assert!(!path.exists());
    }

    #[test]
    fn load_directory_is_error() {
        let dir = tempdir().unwrap();
        let storage = Storage::new(dir.path().to_path_buf());

        assert!(storage.load().is_err());
    }

    #[test]
    fn save_replaces_existing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("key.json");
        let storage = Storage::new(path.clone());

        storage.save(b"first").unwrap();
        storage.save(b"second").unwrap();

        assert_eq!(fs::read(path).unwrap(), b"second");
    }

    #[test]
    fn tmp_file_is_removed_after_success() {
        let dir = tempdir().unwrap();
        let storage = Storage::new(dir.path().join("key.json"));
        storage.save(b"data").unwrap();

        let entries: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();

        assert_eq!(entries, vec!["key.json"]);
    }

    #[cfg(unix)]
    #[test]
    fn failed_save_leaves_no_tmp_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("key.json");
        fs::create_dir(&path).unwrap();
        fs::write(path.join("occupied"), b"x").unwrap();

        assert!(Storage::new(path).save(b"data").is_err());

        let entries: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(entries, vec!["key.json"]);
    }

    #[test]
    fn write_synced_writes_all_bytes() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("key.json.tmp");

        write_synced(File::create(&path).unwrap(), b"payload").unwrap();
        assert_eq!(fs::read(path).unwrap(), b"payload");
    }

    #[test]
    fn tmp_names_are_unique_siblings() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("key.json");
        let storage = Storage::new(path.clone());

        let a = storage.random_tmp_path().unwrap();
        let b = storage.random_tmp_path().unwrap();

        assert_ne!(a, b);
        assert_ne!(a, path);
        assert_eq!(a.parent(), path.parent());
    }

    #[test]
    fn parent_directory_is_created() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("a").join("b").join("key.json");

        Storage::new(nested.clone()).save(b"data").unwrap();
        assert!(nested.exists());
    }
}
