//! In-memory snapshot backend for testing.

use crate::backend::SnapshotBackend;
use crate::error::StorageResult;
use parking_lot::RwLock;

/// An in-memory snapshot backend.
///
/// Suitable for unit tests, integration tests, and catalogs that don't need
/// to outlive the process.
///
/// # Example
///
/// ```rust
/// use libris_storage::{InMemoryBackend, SnapshotBackend};
///
/// let mut backend = InMemoryBackend::new();
/// backend.replace(b"snapshot").unwrap();
/// assert_eq!(backend.data(), Some(b"snapshot".to_vec()));
/// ```
#[derive(Debug, Default)]
pub struct InMemoryBackend {
    data: RwLock<Option<Vec<u8>>>,
}

impl InMemoryBackend {
    /// Creates a new backend with nothing stored.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a backend holding a pre-existing snapshot.
    ///
    /// Useful for testing load of hand-edited or corrupted data.
    #[must_use]
    pub fn with_data(data: impl Into<Vec<u8>>) -> Self {
        Self {
            data: RwLock::new(Some(data.into())),
        }
    }

    /// Returns a copy of the stored snapshot.
    #[must_use]
    pub fn data(&self) -> Option<Vec<u8>> {
        self.data.read().clone()
    }
}

impl SnapshotBackend for InMemoryBackend {
    fn read(&self) -> StorageResult<Option<Vec<u8>>> {
        Ok(self.data.read().clone())
    }

    fn replace(&mut self, data: &[u8]) -> StorageResult<()> {
        *self.data.write() = Some(data.to_vec());
        Ok(())
    }

    fn describe(&self) -> String {
        "in-memory".to_string()
    }
}
