//! Checkout manager and reference validation.

use super::{load_index, persist, Index};
use crate::entity::{Book, Checkout, Entity, User};
use crate::error::{CoreError, CoreResult};
use crate::store::Store;
use std::fmt;
use std::sync::Arc;
use tracing::info;

/// Hook consulted before a checkout is recorded.
///
/// Lets a caller enforce cross-collection rules (for example that the user
/// and book exist) without coupling the checkout manager to the other
/// managers.
pub trait CheckoutValidator: Send + Sync {
    /// Accepts or rejects a checkout that has passed field validation.
    ///
    /// # Errors
    ///
    /// Returns the error the checkout should fail with.
    fn validate(&self, checkout: &Checkout) -> CoreResult<()>;
}

/// Validator requiring both the user and the book to exist in the store.
#[derive(Debug, Clone)]
pub struct StoreReferences {
    store: Arc<Store>,
}

impl StoreReferences {
    /// Creates a validator reading from `store`.
    #[must_use]
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }
}

impl CheckoutValidator for StoreReferences {
    fn validate(&self, checkout: &Checkout) -> CoreResult<()> {
        if !self
            .store
            .contains(User::COLLECTION, User::KEY_FIELD, checkout.user_id())
        {
            return Err(CoreError::not_found(User::NAME, checkout.user_id()));
        }
        if !self
            .store
            .contains(Book::COLLECTION, Book::KEY_FIELD, checkout.isbn())
        {
            return Err(CoreError::not_found(Book::NAME, checkout.isbn()));
        }
        Ok(())
    }
}

/// Manages active checkouts, keyed by ISBN.
///
/// By default a checkout is not checked against the user or book
/// collections; install a [`CheckoutValidator`] with
/// [`CheckoutManager::with_validator`] to enforce that.
pub struct CheckoutManager {
    checkouts: Index<Checkout>,
    store: Arc<Store>,
    validator: Option<Box<dyn CheckoutValidator>>,
}

impl CheckoutManager {
    /// Builds the manager from the checkouts currently in `store`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if a stored checkout fails validation, or
    /// `CorruptData` if one book has two stored checkouts.
    pub fn new(store: Arc<Store>) -> CoreResult<Self> {
        let checkouts = load_index(&store)?;
        Ok(Self {
            checkouts,
            store,
            validator: None,
        })
    }

    /// Builds the manager with a validator consulted on every checkout.
    ///
    /// # Errors
    ///
    /// See [`CheckoutManager::new`].
    pub fn with_validator(
        store: Arc<Store>,
        validator: Box<dyn CheckoutValidator>,
    ) -> CoreResult<Self> {
        let mut manager = Self::new(store)?;
        manager.validator = Some(validator);
        Ok(manager)
    }

    /// Returns whether a validator is installed.
    #[must_use]
    pub fn has_validator(&self) -> bool {
        self.validator.is_some()
    }

    /// Checks a book out to a user.
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` if either field is empty or malformed
    /// - `AlreadyCheckedOut` if the book has an active checkout
    /// - whatever the installed validator returns
    /// - a storage error if the catalog cannot be saved
    pub fn checkout_book(&mut self, user_id: &str, isbn: &str) -> CoreResult<&Checkout> {
        let checkout = Checkout::new(user_id, isbn)?;
        if self.checkouts.contains(checkout.isbn()) {
            return Err(CoreError::AlreadyCheckedOut {
                isbn: checkout.isbn().to_string(),
            });
        }
        if let Some(validator) = &self.validator {
            validator.validate(&checkout)?;
        }

        persist(&self.store, &checkout).map_err(|e| match e {
            CoreError::DuplicateKey { key, .. } => CoreError::AlreadyCheckedOut { isbn: key },
            other => other,
        })?;
        info!(
            user_id = checkout.user_id(),
            isbn = checkout.isbn(),
            "book checked out"
        );
        Ok(self.checkouts.insert(checkout))
    }

    /// Finds the active checkout of a book.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the book is not checked out.
    pub fn find_checkout(&self, isbn: &str) -> CoreResult<&Checkout> {
        let isbn = isbn.trim();
        self.checkouts
            .get(isbn)
            .ok_or_else(|| CoreError::not_found(Checkout::NAME, isbn))
    }

    /// Returns all active checkouts in insertion order.
    #[must_use]
    pub fn list_checkouts(&self) -> &[Checkout] {
        self.checkouts.as_slice()
    }

    /// Returns the number of active checkouts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.checkouts.len()
    }

    /// Returns whether no book is checked out.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.checkouts.len() == 0
    }
}

impl fmt::Debug for CheckoutManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CheckoutManager")
            .field("checkouts", &self.checkouts)
            .field("has_validator", &self.has_validator())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manager::{BookManager, UserManager};
    use libris_storage::InMemoryBackend;

    fn manager() -> CheckoutManager {
        CheckoutManager::new(Arc::new(Store::in_memory().unwrap())).unwrap()
    }

    #[test]
    fn checkout_then_find() {
        let mut checkouts = manager();
        checkouts.checkout_book("001", "9783161484100").unwrap();

        let found = checkouts.find_checkout("9783161484100").unwrap();
        assert_eq!(found.user_id(), "001");
    }

    #[test]
    fn second_checkout_of_same_book_rejected() {
        let mut checkouts = manager();
        checkouts.checkout_book("001", "9783161484100").unwrap();

        let err = checkouts.checkout_book("002", "9783161484100").unwrap_err();
        assert!(matches!(err, CoreError::AlreadyCheckedOut { .. }));
        assert_eq!(checkouts.find_checkout("9783161484100").unwrap().user_id(), "001");
        assert_eq!(checkouts.len(), 1);
    }

    #[test]
    fn empty_fields_rejected() {
        let mut checkouts = manager();
        for (user_id, isbn) in [("", "9783161484100"), ("001", "")] {
            assert!(matches!(
                checkouts.checkout_book(user_id, isbn),
                Err(CoreError::InvalidArgument { .. })
            ));
        }
    }

    #[test]
    fn five_digit_isbn_rejected() {
        let mut checkouts = manager();
        assert!(matches!(
            checkouts.checkout_book("001", "12345"),
            Err(CoreError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn find_unknown_is_not_found() {
        let checkouts = manager();
        assert!(matches!(
            checkouts.find_checkout("9783161484100"),
            Err(CoreError::NotFound { .. })
        ));
    }

    #[test]
    fn references_not_checked_by_default() {
        let mut checkouts = manager();
        assert!(!checkouts.has_validator());
        assert!(checkouts.checkout_book("404", "1234567890").is_ok());
    }

    #[test]
    fn list_in_insertion_order() {
        let mut checkouts = manager();
        checkouts.checkout_book("002", "2222222222").unwrap();
        checkouts.checkout_book("001", "1111111111").unwrap();

        let isbns: Vec<_> = checkouts.list_checkouts().iter().map(Checkout::isbn).collect();
        assert_eq!(isbns, ["2222222222", "1111111111"]);
    }

    #[test]
    fn store_references_require_user_and_book() {
        let store = Arc::new(Store::in_memory().unwrap());
        let mut users = UserManager::new(Arc::clone(&store)).unwrap();
        let mut books = BookManager::new(Arc::clone(&store)).unwrap();
        let mut checkouts = CheckoutManager::with_validator(
            Arc::clone(&store),
            Box::new(StoreReferences::new(Arc::clone(&store))),
        )
        .unwrap();

        users.add_user("John Doe", "001").unwrap();
        assert!(matches!(
            checkouts.checkout_book("001", "9783161484100"),
            Err(CoreError::NotFound { entity: "book", .. })
        ));

        books
            .add_book("test_book", "test_author", "9783161484100")
            .unwrap();
        assert!(matches!(
            checkouts.checkout_book("002", "9783161484100"),
            Err(CoreError::NotFound { entity: "user", .. })
        ));

        checkouts.checkout_book("001", "9783161484100").unwrap();
        assert_eq!(store.stats().checkouts, 1);
    }

    #[test]
    fn duplicate_stored_checkouts_are_corrupt() {
        let json = r#"{"checkouts": [
            {"user_id": "001", "isbn": "9783161484100"},
            {"user_id": "002", "isbn": "9783161484100"}
        ]}"#;
        let store = Store::open(Box::new(InMemoryBackend::with_data(json))).unwrap();
        assert!(matches!(
            CheckoutManager::new(Arc::new(store)),
            Err(CoreError::CorruptData { .. })
        ));
    }
}
