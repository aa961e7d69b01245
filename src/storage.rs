//! Storage collaborator contract.
//!
//! The pipeline itself is stateless; uploads and exported forecasts are
//! persisted by whoever hosts it. The contract is a byte store keyed by
//! strings; keys are namespaced per authenticated caller so users cannot
//! read each other's uploads.

use crate::error::Result;
use std::collections::HashMap;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::debug;

/// Authenticated caller, supplied by the serving layer. The pipeline
/// trusts it and enforces nothing itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub id: i64,
    pub email: String,
}

impl Identity {
    pub fn new(id: i64, email: impl Into<String>) -> Self {
        Self {
            id,
            email: email.into(),
        }
    }
}

/// Key an upload under its owner's namespace.
pub fn upload_key(identity: &Identity, filename: &str) -> String {
    format!("user_{}_{}", identity.id, sanitize_filename(filename))
}

/// Strip anything that could escape the store's namespace. Path
/// separators and control characters become underscores.
fn sanitize_filename(filename: &str) -> String {
    filename
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Byte store consumed by the pipeline's hosts.
pub trait Storage: Send + Sync {
    /// Persist `bytes` under `key`, replacing any previous value.
    fn save(&self, key: &str, bytes: &[u8]) -> Result<()>;

    /// Load the bytes stored under `key`. Missing keys surface as
    /// `NotFound` I/O errors.
    fn load(&self, key: &str) -> Result<Vec<u8>>;

    /// Whether `key` holds a value.
    fn exists(&self, key: &str) -> bool;
}

/// Filesystem store rooted at an upload directory.
#[derive(Debug, Clone)]
pub struct FsStorage {
    root: PathBuf,
}

impl FsStorage {
    /// Create a store rooted at `root`. The directory is created on the
    /// first save.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(sanitize_filename(key))
    }
}

impl Storage for FsStorage {
    fn save(&self, key: &str, bytes: &[u8]) -> Result<()> {
        std::fs::create_dir_all(&self.root)?;
        let path = self.path_for(key);
        debug!(key, bytes = bytes.len(), path = %path.display(), "saving upload");
        std::fs::write(path, bytes)?;
        Ok(())
    }

    fn load(&self, key: &str) -> Result<Vec<u8>> {
        let path = self.path_for(key);
        debug!(key, path = %path.display(), "loading upload");
        Ok(std::fs::read(path)?)
    }

    fn exists(&self, key: &str) -> bool {
        self.path_for(key).is_file()
    }
}

/// In-memory store for tests and hosts without a disk.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn save(&self, key: &str, bytes: &[u8]) -> Result<()> {
        self.entries
            .lock()
            .expect("storage mutex poisoned")
            .insert(key.to_string(), bytes.to_vec());
        Ok(())
    }

    fn load(&self, key: &str) -> Result<Vec<u8>> {
        self.entries
            .lock()
            .expect("storage mutex poisoned")
            .get(key)
            .cloned()
            .ok_or_else(|| {
                io::Error::new(io::ErrorKind::NotFound, format!("no entry for key '{key}'"))
                    .into()
            })
    }

    fn exists(&self, key: &str) -> bool {
        self.entries
            .lock()
            .expect("storage mutex poisoned")
            .contains_key(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PipelineError;

    #[test]
    fn upload_keys_are_namespaced_per_user() {
        let alice = Identity::new(1, "alice@example.com");
        let bob = Identity::new(2, "bob@example.com");

        assert_eq!(upload_key(&alice, "sales.csv"), "user_1_sales.csv");
        assert_ne!(
            upload_key(&alice, "sales.csv"),
            upload_key(&bob, "sales.csv")
        );
    }

    #[test]
    fn upload_keys_neutralize_path_traversal() {
        let user = Identity::new(1, "a@example.com");
        let key = upload_key(&user, "../../etc/passwd");
        assert!(!key.contains('/'));
        assert_eq!(key, "user_1_.._.._etc_passwd");
    }

    #[test]
    fn memory_storage_round_trips() {
        let storage = MemoryStorage::new();
        assert!(!storage.exists("k"));

        storage.save("k", b"hello").unwrap();
        assert!(storage.exists("k"));
        assert_eq!(storage.load("k").unwrap(), b"hello");
    }

    #[test]
    fn memory_storage_missing_key_is_not_found() {
        let storage = MemoryStorage::new();
        let err = storage.load("missing").unwrap_err();
        match err {
            PipelineError::Io(e) => assert_eq!(e.kind(), io::ErrorKind::NotFound),
            other => panic!("expected io error, got {other:?}"),
        }
    }

    #[test]
    fn fs_storage_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FsStorage::new(dir.path().join("uploads"));

        let user = Identity::new(7, "c@example.com");
        let key = upload_key(&user, "sales.csv");

        storage.save(&key, b"date,units_sold\n").unwrap();
        assert!(storage.exists(&key));
        assert_eq!(storage.load(&key).unwrap(), b"date,units_sold\n");
    }

    #[test]
    fn fs_storage_missing_key_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FsStorage::new(dir.path());
        let err = storage.load("absent").unwrap_err();
        match err {
            PipelineError::Io(e) => assert_eq!(e.kind(), io::ErrorKind::NotFound),
            other => panic!("expected io error, got {other:?}"),
        }
    }
}
