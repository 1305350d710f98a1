//! File-based snapshot backend for persistent storage.

use crate::backend::SnapshotBackend;
use crate::error::{StorageError, StorageResult};
use fs2::FileExt;
use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::warn;

/// Suffix of the temporary file used for atomic replacement.
const TEMP_SUFFIX: &str = ".tmp";
/// Suffix of the advisory lock file.
const LOCK_SUFFIX: &str = ".lock";

/// A file-based snapshot backend.
///
/// The snapshot lives in a single file. Replacement uses the
/// write-then-rename pattern so that a crash mid-write never leaves a
/// half-written file in place of the snapshot:
///
/// 1. Write the new bytes to `<file>.tmp`
/// 2. Sync the temporary file to disk
/// 3. Rename it over `<file>`
/// 4. Fsync the parent directory so the rename itself is durable
///
/// Once the rename succeeds the new snapshot is the one readers see, so a
/// failed directory fsync is logged and the replacement still reports
/// success.
///
/// # Locking
///
/// [`FileBackend::open`] takes an exclusive advisory lock on `<file>.lock`
/// for as long as the backend is alive. A second backend on the same file
/// fails with [`StorageError::Locked`].
///
/// # Example
///
/// ```no_run
/// use libris_storage::{FileBackend, SnapshotBackend};
/// use std::path::Path;
///
/// let mut backend = FileBackend::open(Path::new("library_data.json")).unwrap();
/// backend.replace(b"{}").unwrap();
/// ```
#[derive(Debug)]
pub struct FileBackend {
    path: PathBuf,
    temp_path: PathBuf,
    /// Lock file handle (held for exclusive access). None when unlocked.
    lock_file: Option<File>,
}

impl FileBackend {
    /// Opens a file backend at `path` and acquires its lock.
    ///
    /// The snapshot file itself is not created until the first `replace`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Locked`] if another backend holds the lock,
    /// or an I/O error if the lock file cannot be opened.
    pub fn open(path: &Path) -> StorageResult<Self> {
        let lock_path = sibling(path, LOCK_SUFFIX);
        let lock_file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)?;

        // Non-blocking
        if lock_file.try_lock_exclusive().is_err() {
            return Err(StorageError::Locked { path: lock_path });
        }

        Ok(Self {
            path: path.to_path_buf(),
            temp_path: sibling(path, TEMP_SUFFIX),
            lock_file: Some(lock_file),
        })
    }

    /// Opens a file backend without taking the advisory lock.
    ///
    /// Useful for read-only tooling that inspects a catalog owned by
    /// another process.
    #[must_use]
    pub fn open_unlocked(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            temp_path: sibling(path, TEMP_SUFFIX),
            lock_file: None,
        }
    }

    /// Opens a file backend, creating parent directories if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if directories cannot be created or the lock cannot
    /// be acquired.
    pub fn open_with_create_dirs(path: &Path) -> StorageResult<Self> {
        if let Some(parent) = parent_dir(path) {
            fs::create_dir_all(parent)?;
        }
        Self::open(path)
    }

    /// Returns the path to the snapshot file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns whether this backend holds the advisory lock.
    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.lock_file.is_some()
    }

    #[cfg(unix)]
    fn sync_parent(&self) -> StorageResult<()> {
        let dir = parent_dir(&self.path).unwrap_or_else(|| Path::new("."));
        File::open(dir)?.sync_all()?;
        Ok(())
    }

    #[cfg(not(unix))]
    fn sync_parent(&self) -> StorageResult<()> {
        // Directory fsync is not supported on Windows; NTFS journals metadata
        Ok(())
    }
}

impl SnapshotBackend for FileBackend {
    fn read(&self) -> StorageResult<Option<Vec<u8>>> {
        match fs::read(&self.path) {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn replace(&mut self, data: &[u8]) -> StorageResult<()> {
        let mut file = File::create(&self.temp_path)?;
        if let Err(e) = file.write_all(data).and_then(|()| file.sync_all()) {
            drop(file);
            let _ = fs::remove_file(&self.temp_path);
            return Err(e.into());
        }
        drop(file);

        if let Err(e) = fs::rename(&self.temp_path, &self.path) {
            let _ = fs::remove_file(&self.temp_path);
            return Err(e.into());
        }

        if let Err(e) = self.sync_parent() {
            warn!(
                path = %self.path.display(),
                error = %e,
                "snapshot replaced but directory sync failed"
            );
        }
        Ok(())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Returns `path` with `suffix` appended to its file name.
fn sibling(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("snapshot"));
    name.push(suffix);
    path.with_file_name(name)
}

fn parent_dir(path: &Path) -> Option<&Path> {
    path.parent().filter(|p| !p.as_os_str().is_empty())
}
