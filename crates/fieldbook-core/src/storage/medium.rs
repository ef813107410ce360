//! Synchronous key-value storage media
//!
//! The store persists each collection as one textual document under a
//! string key. [`FileMedium`] keeps one JSON file per key in the data
//! directory and writes atomically (write to temp file, then rename) so a
//! document is never left half-written. [`MemoryMedium`] backs tests and
//! embedding scenarios.

use std::collections::HashMap;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use super::error::{StorageError, StorageResult};

/// A synchronous key-value storage medium.
///
/// All operations run to completion before returning; there is no
/// asynchronous I/O and no locking across processes. Two processes
/// sharing one medium can race (lost update); an accepted limitation.
pub trait StorageMedium {
    /// Read the document stored under `key`, or `None` if absent
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Store `value` under `key`, replacing any existing document
    fn put(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Remove the document under `key`; removing an absent key is a no-op
    fn remove(&self, key: &str) -> StorageResult<()>;
}

/// File-backed medium: one JSON document per key under a data directory
pub struct FileMedium {
    data_dir: PathBuf,
}

impl FileMedium {
    /// Open a medium rooted at `data_dir`, creating the directory if needed
    pub fn new(data_dir: impl Into<PathBuf>) -> StorageResult<Self> {
        let data_dir = data_dir.into();
        fs::create_dir_all(&data_dir).map_err(|source| StorageError::CreateDirectory {
            path: data_dir.clone(),
            source,
        })?;
        Ok(Self { data_dir })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.data_dir.join(format!("{key}.json"))
    }
}

impl StorageMedium for FileMedium {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let path = self.key_path(key);
        if !path.exists() {
            return Ok(None);
        }
        fs::read_to_string(&path)
            .map(Some)
            .map_err(|source| StorageError::ReadError { path, source })
    }

    fn put(&self, key: &str, value: &str) -> StorageResult<()> {
        atomic_write(&self.key_path(key), value.as_bytes())
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        let path = self.key_path(key);
        if path.exists() {
            fs::remove_file(&path).map_err(|source| StorageError::from_io(source, path))?;
        }
        Ok(())
    }
}

/// Write data to a file atomically
///
/// 1. Write to a temporary file in the same directory
/// 2. Sync the file to disk
/// 3. Rename the temp file to the target path
///
/// This ensures the target file is never left in a partially-written state.
fn atomic_write(path: &Path, data: &[u8]) -> StorageResult<()> {
    let temp_path = path.with_extension("tmp");

    let mut file = File::create(&temp_path)
        .map_err(|source| StorageError::from_io(source, temp_path.clone()))?;

    file.write_all(data)
        .map_err(|source| StorageError::from_io(source, temp_path.clone()))?;

    // Sync to disk before rename
    file.sync_all()
        .map_err(|source| StorageError::from_io(source, temp_path.clone()))?;

    fs::rename(&temp_path, path).map_err(|source| StorageError::AtomicWriteFailed {
        from: temp_path,
        to: path.to_path_buf(),
        source,
    })?;

    Ok(())
}

/// In-memory medium for tests and embedding
#[derive(Default)]
pub struct MemoryMedium {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryMedium {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageMedium for MemoryMedium {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(key).cloned())
    }

    fn put(&self, key: &str, value: &str) -> StorageResult<()> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_medium_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let medium = FileMedium::new(temp_dir.path()).unwrap();

        assert!(medium.get("crm_visits").unwrap().is_none());

        medium.put("crm_visits", "[]").unwrap();
        assert_eq!(medium.get("crm_visits").unwrap().as_deref(), Some("[]"));

        medium.put("crm_visits", "[1]").unwrap();
        assert_eq!(medium.get("crm_visits").unwrap().as_deref(), Some("[1]"));
    }

    #[test]
    fn test_file_medium_remove() {
        let temp_dir = TempDir::new().unwrap();
        let medium = FileMedium::new(temp_dir.path()).unwrap();

        medium.put("crm_orders", "[]").unwrap();
        medium.remove("crm_orders").unwrap();
        assert!(medium.get("crm_orders").unwrap().is_none());

        // Removing an absent key is a no-op
        medium.remove("crm_orders").unwrap();
    }

    #[test]
    fn test_file_medium_creates_data_dir() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("a").join("b");
        let medium = FileMedium::new(&nested).unwrap();
        medium.put("key", "value").unwrap();
        assert!(nested.join("key.json").exists());
    }

    #[test]
    fn test_atomic_write_leaves_no_temp_file() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("doc.json");
        atomic_write(&target, b"{}").unwrap();
        assert!(target.exists());
        assert!(!temp_dir.path().join("doc.tmp").exists());
    }

    #[test]
    fn test_memory_medium_round_trip() {
        let medium = MemoryMedium::new();
        assert!(medium.get("k").unwrap().is_none());
        medium.put("k", "v").unwrap();
        assert_eq!(medium.get("k").unwrap().as_deref(), Some("v"));
        medium.remove("k").unwrap();
        assert!(medium.get("k").unwrap().is_none());
    }
}
