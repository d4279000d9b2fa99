/*!
Storage adapters for fixture files.

This module defines the storage abstraction (port) and its adapters. The
handler only ever asks for "the bytes at this path, if any" and "replace the
bytes at this path", which keeps the state machine testable in memory.
*/

pub mod local;

use std::path::Path;

use crate::Result;

/// Storage abstraction for reading and writing fixture bytes
pub trait StorageAdapter {
    /// Load the fixture at `path`
    ///
    /// # Returns
    /// `Ok(None)` when nothing is stored there yet, the bytes otherwise
    fn load(&self, path: &Path) -> Result<Option<Vec<u8>>>;

    /// Replace the fixture at `path` with `data`
    ///
    /// Missing parent locations are created as needed.
    fn save(&self, data: &[u8], path: &Path) -> Result<()>;
}

pub use local::LocalFileStorage;

/// Memory-based storage adapter for testing
///
/// This implementation stores fixtures in memory using a HashMap and counts
/// writes, so tests can assert that a call left storage untouched.
#[cfg(test)]
pub struct MemoryStorage {
    data: std::sync::Mutex<std::collections::HashMap<std::path::PathBuf, Vec<u8>>>,
    writes: std::sync::atomic::AtomicUsize,
}

#[cfg(test)]
impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
impl MemoryStorage {
    pub fn new() -> Self {
        Self {
            data: std::sync::Mutex::new(std::collections::HashMap::new()),
            writes: std::sync::atomic::AtomicUsize::new(0),
        }
    }

    /// Seed a fixture without counting it as a write
    pub fn insert<P: AsRef<Path>>(&self, path: P, data: impl Into<Vec<u8>>) {
        let mut storage = self.data.lock().unwrap();
        storage.insert(path.as_ref().to_path_buf(), data.into());
    }

    pub fn get<P: AsRef<Path>>(&self, path: P) -> Option<Vec<u8>> {
        let storage = self.data.lock().unwrap();
        storage.get(path.as_ref()).cloned()
    }

    pub fn write_count(&self) -> usize {
        self.writes.load(std::sync::atomic::Ordering::SeqCst)
    }
}

#[cfg(test)]
impl StorageAdapter for MemoryStorage {
    fn load(&self, path: &Path) -> Result<Option<Vec<u8>>> {
        let storage = self.data.lock().unwrap();
        Ok(storage.get(path).cloned())
    }

    fn save(&self, data: &[u8], path: &Path) -> Result<()> {
        let mut storage = self.data.lock().unwrap();
        storage.insert(path.to_path_buf(), data.to_vec());
        self.writes
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        Ok(())
    }
}
