//! Snapshot backend trait definition.

use crate::error::StorageResult;

/// A whole-snapshot storage backend for Libris.
///
/// Backends are **opaque snapshot stores**. They hold a single byte buffer
/// that is always read and written in full. Libris owns the document format;
/// backends never parse what they store.
///
/// # Invariants
///
/// - `read` returns `None` until the first successful `replace`
/// - `read` returns exactly the bytes of the last successful `replace`
/// - A failed `replace` leaves the previous snapshot readable and intact
/// - Backends must be `Send + Sync`
///
/// # Implementors
///
/// - [`super::InMemoryBackend`] - For testing
/// - [`super::FileBackend`] - For persistent storage
pub trait SnapshotBackend: Send + Sync {
    /// Reads the current snapshot.
    ///
    /// Returns `Ok(None)` when nothing has been stored yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying medium cannot be read.
    fn read(&self) -> StorageResult<Option<Vec<u8>>>;

    /// Replaces the stored snapshot with `data`.
    ///
    /// After this returns successfully the new snapshot is durable. If it
    /// fails, the previous snapshot is still the one `read` returns.
    ///
    /// # Errors
    ///
    /// Returns an error if the medium is not writable.
    fn replace(&mut self, data: &[u8]) -> StorageResult<()>;

    /// Returns a short human-readable description of where data lives.
    fn describe(&self) -> String;
}
