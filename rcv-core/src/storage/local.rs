/*!
Local filesystem storage adapter implementation.
*/

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::debug;

use super::StorageAdapter;
use crate::{RcvError, Result};

/// Local filesystem storage adapter
///
/// Fixtures are written atomically: the bytes go to a temporary file in the
/// target directory which is then renamed over the fixture, so a crash
/// mid-write never leaves a truncated file behind. Parent directories are
/// created when missing.
///
/// # Example
/// ```rust
/// use rcv_core::storage::{LocalFileStorage, StorageAdapter};
/// use std::path::Path;
///
/// # let dir = tempfile::tempdir()?;
/// let storage = LocalFileStorage::with_base_dir(dir.path());
/// storage.save(b"{}\n", Path::new("nested/fixture.json"))?;
/// assert_eq!(storage.load(Path::new("nested/fixture.json"))?, Some(b"{}\n".to_vec()));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct LocalFileStorage {
    /// Optional base directory for all fixtures
    base_dir: Option<PathBuf>,
}

impl LocalFileStorage {
    /// Create a new local file storage adapter without a base directory
    ///
    /// Paths provided to save/load will be used as-is.
    pub fn new() -> Self {
        Self { base_dir: None }
    }

    /// Create a new local file storage adapter with a base directory
    ///
    /// All relative paths will be resolved against the base directory.
    pub fn with_base_dir<P: AsRef<Path>>(base_dir: P) -> Self {
        Self {
            base_dir: Some(base_dir.as_ref().to_path_buf()),
        }
    }

    /// Resolve the full path for a given storage path
    fn resolve_path(&self, path: &Path) -> PathBuf {
        match &self.base_dir {
            Some(base) => base.join(path),
            None => path.to_path_buf(),
        }
    }

    /// Directory the fixture lives in, creating it if necessary
    fn ensure_parent_dir(&self, path: &Path) -> Result<PathBuf> {
        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        if !parent.exists() {
            fs::create_dir_all(&parent).map_err(|e| {
                RcvError::storage(format!(
                    "Failed to create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
        Ok(parent)
    }
}

impl StorageAdapter for LocalFileStorage {
    fn load(&self, path: &Path) -> Result<Option<Vec<u8>>> {
        let full_path = self.resolve_path(path);

        match fs::read(&full_path) {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(RcvError::storage(format!(
                "Failed to read fixture from {}: {}",
                full_path.display(),
                e
            ))),
        }
    }

    fn save(&self, data: &[u8], path: &Path) -> Result<()> {
        let full_path = self.resolve_path(path);
        let parent = self.ensure_parent_dir(&full_path)?;

        let write_err = |e: std::io::Error| {
            RcvError::storage(format!(
                "Failed to write fixture to {}: {}",
                full_path.display(),
                e
            ))
        };

        let mut temp = NamedTempFile::new_in(&parent).map_err(write_err)?;
        temp.write_all(data).map_err(write_err)?;
        temp.as_file().sync_all().map_err(write_err)?;
        temp.persist(&full_path).map_err(|e| write_err(e.error))?;

        debug!(path = %full_path.display(), bytes = data.len(), "fixture written");
        Ok(())
    }
}
