//! Persistent store over a snapshot backend.

use crate::entity::{Collection, Entity, Record};
use crate::error::{CoreError, CoreResult};
use crate::snapshot::Snapshot;
use crate::stats::CatalogStats;
use libris_storage::{InMemoryBackend, SnapshotBackend};
use parking_lot::Mutex;
use tracing::debug;

/// Durable whole-catalog snapshot with per-collection record primitives.
///
/// The store keeps the last persisted [`Snapshot`] in memory and rewrites
/// it in full through its backend on every mutation. Mutations are staged
/// on a copy and committed to memory only once the backend has accepted
/// the write, so a failed save leaves the store exactly as it was.
///
/// Entity managers share one store through an `Arc`.
///
/// # Example
///
/// ```rust
/// use libris_core::{Book, Entity, Store};
///
/// let store = Store::in_memory().unwrap();
/// let book = Book::new("Dune", "Frank Herbert", "9780441013593").unwrap();
/// store.add_record(Book::COLLECTION, book.to_record(), Book::KEY_FIELD).unwrap();
///
/// let books: Vec<Book> = store.get_records().unwrap();
/// assert_eq!(books, vec![book]);
/// ```
pub struct Store {
    backend: Mutex<Box<dyn SnapshotBackend>>,
    snapshot: Mutex<Snapshot>,
    pretty: bool,
}

impl Store {
    /// Opens a store over `backend` and loads its snapshot.
    ///
    /// # Errors
    ///
    /// Returns `CorruptData` if the stored bytes are not a valid snapshot,
    /// or a storage error if they cannot be read.
    pub fn open(backend: Box<dyn SnapshotBackend>) -> CoreResult<Self> {
        Self::open_with_options(backend, true)
    }

    /// Opens a store, choosing whether snapshots are pretty-printed.
    ///
    /// # Errors
    ///
    /// See [`Store::open`].
    pub fn open_with_options(backend: Box<dyn SnapshotBackend>, pretty: bool) -> CoreResult<Self> {
        let store = Self {
            backend: Mutex::new(backend),
            snapshot: Mutex::new(Snapshot::default()),
            pretty,
        };
        store.load()?;
        Ok(store)
    }

    /// Opens an empty store that is not persisted anywhere.
    ///
    /// # Errors
    ///
    /// Never fails in practice; the signature matches [`Store::open`].
    pub fn in_memory() -> CoreResult<Self> {
        Self::open(Box::new(InMemoryBackend::new()))
    }

    /// Reads the snapshot from storage, replacing the in-memory copy.
    ///
    /// No stored snapshot yields an empty catalog.
    ///
    /// # Errors
    ///
    /// Returns `CorruptData` if the stored bytes are not a valid snapshot.
    /// The in-memory copy is left untouched on error.
    pub fn load(&self) -> CoreResult<Snapshot> {
        let data = self.backend.lock().read()?;
        let snapshot = match data {
            Some(bytes) => Snapshot::decode(&bytes)?,
            None => Snapshot::default(),
        };
        debug!(
            books = snapshot.books.len(),
            users = snapshot.users.len(),
            checkouts = snapshot.checkouts.len(),
            "loaded snapshot"
        );
        *self.snapshot.lock() = snapshot.clone();
        Ok(snapshot)
    }

    /// Writes the full in-memory snapshot to storage.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the medium is not writable.
    pub fn save(&self) -> CoreResult<()> {
        let snapshot = self.snapshot.lock();
        self.write(&snapshot)
    }

    /// Returns a copy of the in-memory snapshot.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        self.snapshot.lock().clone()
    }

    /// Appends `record` to `collection` and saves.
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` if `record` has no `unique_field`
    /// - `DuplicateKey` if a record with the same `unique_field` value exists
    /// - a storage error if the save fails, in which case nothing is appended
    pub fn add_record(
        &self,
        collection: Collection,
        record: Record,
        unique_field: &str,
    ) -> CoreResult<()> {
        let mut snapshot = self.snapshot.lock();

        let key = record.get(unique_field).cloned().ok_or_else(|| {
            CoreError::invalid_argument(format!(
                "record for {collection} is missing unique field `{unique_field}`"
            ))
        })?;
        let exists = snapshot
            .records(collection)
            .iter()
            .any(|r| r.get(unique_field) == Some(&key));
        if exists {
            return Err(CoreError::duplicate_key(collection.name(), key));
        }

        let mut staged = snapshot.clone();
        staged.records_mut(collection).push(record);
        self.write(&staged)?;
        *snapshot = staged;

        debug!(%collection, %key, "record added");
        Ok(())
    }

    /// Returns every record of `T`'s collection as a typed entity.
    ///
    /// Each record is rebuilt through `T`'s validating constructor. Once
    /// the whole collection validates, the in-memory records are replaced
    /// by the entities' canonical form (trimmed fields, no unknown fields),
    /// so later key comparisons see the same values the managers index.
    /// Storage catches up on the next save.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` for the first record that fails validation.
    /// The collection is left untouched in that case.
    pub fn get_records<T: Entity>(&self) -> CoreResult<Vec<T>> {
        let mut snapshot = self.snapshot.lock();
        let entities = snapshot
            .records(T::COLLECTION)
            .iter()
            .map(T::from_record)
            .collect::<CoreResult<Vec<T>>>()?;
        *snapshot.records_mut(T::COLLECTION) = entities.iter().map(Entity::to_record).collect();
        Ok(entities)
    }

    /// Removes every record in `collection` whose `key_field` equals `key`.
    ///
    /// Saves whether or not anything matched and returns the number of
    /// records removed.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the save fails, in which case nothing is
    /// removed.
    pub fn remove_record(
        &self,
        collection: Collection,
        key: &str,
        key_field: &str,
    ) -> CoreResult<usize> {
        let mut snapshot = self.snapshot.lock();

        let mut staged = snapshot.clone();
        let records = staged.records_mut(collection);
        let before = records.len();
        records.retain(|r| r.get(key_field).map(String::as_str) != Some(key));
        let removed = before - records.len();

        self.write(&staged)?;
        *snapshot = staged;

        debug!(%collection, key, removed, "records removed");
        Ok(removed)
    }

    /// Returns whether `collection` holds a record with `field == value`.
    #[must_use]
    pub fn contains(&self, collection: Collection, field: &str, value: &str) -> bool {
        self.snapshot
            .lock()
            .records(collection)
            .iter()
            .any(|r| r.get(field).map(String::as_str) == Some(value))
    }

    /// Returns record counts per collection.
    #[must_use]
    pub fn stats(&self) -> CatalogStats {
        CatalogStats::from_snapshot(&self.snapshot.lock())
    }

    /// Describes where the snapshot is stored.
    #[must_use]
    pub fn describe(&self) -> String {
        self.backend.lock().describe()
    }

    fn write(&self, snapshot: &Snapshot) -> CoreResult<()> {
        let data = snapshot.encode(self.pretty)?;
        self.backend.lock().replace(&data)?;
        debug!(bytes = data.len(), "saved snapshot");
        Ok(())
    }
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("backend", &self.describe())
            .field("stats", &self.stats())
            .finish()
    }
}
