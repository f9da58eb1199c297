//! Key/value storage adapters backing the record store.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Durable byte storage addressed by key. Values are not required to be UTF-8;
/// interpreting them is up to the caller.
pub trait Storage {
    /// Returns `None` when nothing is stored under `key`.
    fn get(&self, key: &str) -> io::Result<Option<Vec<u8>>>;
    fn set(&mut self, key: &str, value: &[u8]) -> io::Result<()>;
}

/// Stores each key as `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> io::Result<Option<Vec<u8>>> {
        match fs::read(self.path_for(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn set(&mut self, key: &str, value: &[u8]) -> io::Result<()> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.path_for(key), value)
    }
}

/// In-process storage, mostly for tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, Vec<u8>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(key: &str, value: impl Into<Vec<u8>>) -> Self {
        let mut storage = Self::default();
        storage.entries.insert(key.to_string(), value.into());
        storage
    }

    pub fn raw_bytes(&self, key: &str) -> Option<&[u8]> {
        self.entries.get(key).map(Vec::as_slice)
    }

    /// The stored value, if present and valid UTF-8.
    pub fn raw(&self, key: &str) -> Option<&str> {
        self.raw_bytes(key)
            .and_then(|bytes| std::str::from_utf8(bytes).ok())
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> io::Result<Option<Vec<u8>>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &[u8]) -> io::Result<()> {
        self.entries.insert(key.to_string(), value.to_vec());
        Ok(())
    }
}
