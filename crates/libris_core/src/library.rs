//! Library facade.

use crate::config::Config;
use crate::error::CoreResult;
use crate::manager::{BookManager, CheckoutManager, StoreReferences, UserManager};
use crate::stats::CatalogStats;
use crate::store::Store;
use libris_storage::{FileBackend, InMemoryBackend, SnapshotBackend, StorageError};
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// The main catalog handle.
///
/// `Library` opens a [`Store`] and builds the book, user, and checkout
/// managers over it. All three share the store, so every mutation made
/// through any manager lands in the same snapshot.
///
/// # Opening a Library
///
/// ```rust,no_run
/// use libris_core::Library;
/// use std::path::Path;
///
/// let mut library = Library::open(Path::new("library_data.json"))?;
/// library.books_mut().add_book("Dune", "Frank Herbert", "9780441013593")?;
/// # Ok::<(), libris_core::CoreError>(())
/// ```
///
/// # In-Memory Libraries
///
/// ```rust
/// use libris_core::Library;
///
/// let mut library = Library::open_in_memory().unwrap();
/// library.users_mut().add_user("Jane Doe", "002").unwrap();
/// assert_eq!(library.users().get_user("002").unwrap().name(), "Jane Doe");
/// ```
#[derive(Debug)]
pub struct Library {
    config: Config,
    store: Arc<Store>,
    books: BookManager,
    users: UserManager,
    checkouts: CheckoutManager,
}

impl Library {
    /// Opens the catalog stored at `path` with default settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog is locked, unreadable, or corrupt.
    pub fn open(path: &Path) -> CoreResult<Self> {
        Self::open_with_config(Config::default().path(path))
    }

    /// Opens the catalog described by `config`.
    ///
    /// # Errors
    ///
    /// - a storage error if the lock is held or directories cannot be created
    /// - `CorruptData` if the snapshot is not a valid document
    /// - `InvalidArgument` if a stored record fails validation
    pub fn open_with_config(config: Config) -> CoreResult<Self> {
        let backend = match (config.lock, config.create_dirs) {
            (true, true) => FileBackend::open_with_create_dirs(&config.path)?,
            (true, false) => FileBackend::open(&config.path)?,
            (false, create_dirs) => {
                if create_dirs {
                    create_parent_dirs(&config.path)?;
                }
                FileBackend::open_unlocked(&config.path)
            }
        };

        let library = Self::with_backend(Box::new(backend), config)?;
        info!(
            path = %library.config.path.display(),
            books = library.books.len(),
            users = library.users.len(),
            checkouts = library.checkouts.len(),
            "library opened"
        );
        Ok(library)
    }

    /// Opens an empty catalog that lives only in memory.
    ///
    /// # Errors
    ///
    /// Never fails in practice; the signature matches [`Library::open`].
    pub fn open_in_memory() -> CoreResult<Self> {
        Self::with_backend(
            Box::new(InMemoryBackend::new()),
            Config::default(),
        )
    }

    /// Opens a catalog over an arbitrary backend.
    ///
    /// `config.path` and `config.lock` are ignored; the backend decides
    /// where data lives.
    ///
    /// # Errors
    ///
    /// Same as [`Library::open_with_config`], minus the locking errors.
    pub fn with_backend(backend: Box<dyn SnapshotBackend>, config: Config) -> CoreResult<Self> {
        let store = Arc::new(Store::open_with_options(backend, config.pretty)?);
        let books = BookManager::new(Arc::clone(&store))?;
        let users = UserManager::new(Arc::clone(&store))?;
        let checkouts = if config.enforce_references {
            CheckoutManager::with_validator(
                Arc::clone(&store),
                Box::new(StoreReferences::new(Arc::clone(&store))),
            )?
        } else {
            CheckoutManager::new(Arc::clone(&store))?
        };

        Ok(Self {
            config,
            store,
            books,
            users,
            checkouts,
        })
    }

    /// Returns the configuration the library was opened with.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the shared store.
    #[must_use]
    pub fn store(&self) -> &Arc<Store> {
        &self.store
    }

    /// Returns the book manager.
    #[must_use]
    pub fn books(&self) -> &BookManager {
        &self.books
    }

    /// Returns the book manager for modification.
    pub fn books_mut(&mut self) -> &mut BookManager {
        &mut self.books
    }

    /// Returns the user manager.
    #[must_use]
    pub fn users(&self) -> &UserManager {
        &self.users
    }

    /// Returns the user manager for modification.
    pub fn users_mut(&mut self) -> &mut UserManager {
        &mut self.users
    }

    /// Returns the checkout manager.
    #[must_use]
    pub fn checkouts(&self) -> &CheckoutManager {
        &self.checkouts
    }

    /// Returns the checkout manager for modification.
    pub fn checkouts_mut(&mut self) -> &mut CheckoutManager {
        &mut self.checkouts
    }

    /// Returns record counts per collection.
    #[must_use]
    pub fn stats(&self) -> CatalogStats {
        self.store.stats()
    }
}

fn create_parent_dirs(path: &Path) -> CoreResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(StorageError::from)?;
    }
    Ok(())
}
