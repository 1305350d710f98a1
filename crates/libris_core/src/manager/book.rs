//! Book manager.

use super::{load_index, persist, unpersist, Index};
use crate::entity::{Book, Entity};
use crate::error::{CoreError, CoreResult};
use crate::store::Store;
use std::sync::Arc;
use tracing::info;

/// Manages the catalog's books, keyed by ISBN.
#[derive(Debug)]
pub struct BookManager {
    books: Index<Book>,
    store: Arc<Store>,
}

impl BookManager {
    /// Builds the manager from the books currently in `store`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if a stored book fails validation, or
    /// `CorruptData` if two stored books share an ISBN.
    pub fn new(store: Arc<Store>) -> CoreResult<Self> {
        let books = load_index(&store)?;
        Ok(Self { books, store })
    }

    /// Adds a new book.
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` if any field is empty or the ISBN is malformed
    /// - `DuplicateKey` if a book with the same ISBN already exists
    /// - a storage error if the catalog cannot be saved
    pub fn add_book(&mut self, title: &str, author: &str, isbn: &str) -> CoreResult<&Book> {
        let book = Book::new(title, author, isbn)?;
        if self.books.contains(book.isbn()) {
            return Err(CoreError::duplicate_key(Book::COLLECTION.name(), book.isbn()));
        }

        persist(&self.store, &book)?;
        info!(isbn = book.isbn(), title = book.title(), "book added");
        Ok(self.books.insert(book))
    }

    /// Finds a book by ISBN.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no book has this ISBN.
    pub fn find_book_by_isbn(&self, isbn: &str) -> CoreResult<&Book> {
        let isbn = isbn.trim();
        self.books
            .get(isbn)
            .ok_or_else(|| CoreError::not_found(Book::NAME, isbn))
    }

    /// Removes a book by ISBN and returns it.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no book has this ISBN, or a storage error if the
    /// catalog cannot be saved. Neither case changes the catalog.
    pub fn remove_book_by_isbn(&mut self, isbn: &str) -> CoreResult<Book> {
        let isbn = isbn.trim();
        if !self.books.contains(isbn) {
            return Err(CoreError::not_found(Book::NAME, isbn));
        }

        unpersist::<Book>(&self.store, isbn)?;
        info!(isbn, "book removed");
        self.books
            .remove(isbn)
            .ok_or_else(|| CoreError::not_found(Book::NAME, isbn))
    }

    /// Returns all books in insertion order.
    #[must_use]
    pub fn list_books(&self) -> &[Book] {
        self.books.as_slice()
    }

    /// Returns the number of books.
    #[must_use]
    pub fn len(&self) -> usize {
        self.books.len()
    }

    /// Returns whether the catalog has no books.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.books.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::tests::FlakyBackend;
    use libris_storage::InMemoryBackend;
    use std::sync::atomic::Ordering;

    fn manager() -> BookManager {
        BookManager::new(Arc::new(Store::in_memory().unwrap())).unwrap()
    }

    #[test]
    fn add_then_find() {
        let mut books = manager();
        books
            .add_book(" Python Programming ", "John Doe", "1234567890")
            .unwrap();

        let book = books.find_book_by_isbn("1234567890").unwrap();
        assert_eq!(book.title(), "Python Programming");
        assert_eq!(book.author(), "John Doe");
        assert_eq!(book.isbn(), "1234567890");
    }

    #[test]
    fn duplicate_isbn_rejected() {
        let mut books = manager();
        books
            .add_book("Python Programming", "John Doe", "1234567890")
            .unwrap();

        let err = books
            .add_book("Advanced Python", "Jane Smith", "1234567890")
            .unwrap_err();
        assert!(matches!(err, CoreError::DuplicateKey { .. }));
        assert_eq!(books.len(), 1);
        assert_eq!(books.list_books()[0].title(), "Python Programming");
    }

    #[test]
    fn empty_field_checked_before_duplicate() {
        let mut books = manager();
        books.add_book("Python", "John Doe", "1234567890").unwrap();

        let err = books.add_book("", "John Doe", "1234567890").unwrap_err();
        assert!(matches!(err, CoreError::InvalidArgument { .. }));
    }

    #[test]
    fn empty_fields_rejected() {
        let mut books = manager();
        for (title, author, isbn) in [
            ("", "John Doe", "1234567890"),
            ("Python Programming", "", "1234567890"),
            ("Python Programming", "John Doe", ""),
        ] {
            assert!(matches!(
                books.add_book(title, author, isbn),
                Err(CoreError::InvalidArgument { .. })
            ));
        }
        assert!(books.is_empty());
    }

    #[test]
    fn five_digit_isbn_rejected() {
        let mut books = manager();
        assert!(matches!(
            books.add_book("Python", "John Doe", "12345"),
            Err(CoreError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn find_missing_is_not_found() {
        let books = manager();
        assert!(matches!(
            books.find_book_by_isbn("9999999999"),
            Err(CoreError::NotFound { .. })
        ));
    }

    #[test]
    fn remove_present_book() {
        let mut books = manager();
        books.add_book("Python", "John Doe", "1234567890").unwrap();

        let removed = books.remove_book_by_isbn("1234567890").unwrap();
        assert_eq!(removed.isbn(), "1234567890");
        assert!(matches!(
            books.find_book_by_isbn("1234567890"),
            Err(CoreError::NotFound { .. })
        ));
        assert!(books.store.snapshot().books.is_empty());
    }

    #[test]
    fn remove_missing_has_no_side_effect() {
        let mut books = manager();
        books.add_book("Python", "John Doe", "1234567890").unwrap();

        assert!(matches!(
            books.remove_book_by_isbn("9999999999"),
            Err(CoreError::NotFound { .. })
        ));
        assert_eq!(books.len(), 1);
        assert_eq!(books.store.stats().books, 1);
    }

    #[test]
    fn list_in_insertion_order() {
        let mut books = manager();
        books.add_book("B", "Author", "2222222222").unwrap();
        books.add_book("A", "Author", "1111111111").unwrap();
        books.add_book("C", "Author", "3333333333").unwrap();
        books.remove_book_by_isbn("1111111111").unwrap();

        let titles: Vec<_> = books.list_books().iter().map(Book::title).collect();
        assert_eq!(titles, ["B", "C"]);
    }

    #[test]
    fn loads_existing_books() {
        let json = r#"{"books": [
            {"title": "Dune", "author": "Frank Herbert", "isbn": "9780441013593"},
            {"title": "Emma", "author": "Jane Austen", "isbn": "0141439580"}
        ]}"#;
        let store = Store::open(Box::new(InMemoryBackend::with_data(json))).unwrap();
        let books = BookManager::new(Arc::new(store)).unwrap();

        assert_eq!(books.len(), 2);
        assert_eq!(books.list_books()[1].title(), "Emma");
    }

    #[test]
    fn failed_persist_leaves_index_unchanged() {
        let (backend, fail) = FlakyBackend::new();
        let store = Arc::new(Store::open(Box::new(backend)).unwrap());
        let mut books = BookManager::new(Arc::clone(&store)).unwrap();
        books.add_book("Python", "John Doe", "1234567890").unwrap();

        fail.store(true, Ordering::SeqCst);
        assert!(matches!(
            books.add_book("Rust", "Jane Smith", "0987654321"),
            Err(CoreError::Storage(_))
        ));
        assert!(books.find_book_by_isbn("0987654321").is_err());

        assert!(books.remove_book_by_isbn("1234567890").is_err());
        assert!(books.find_book_by_isbn("1234567890").is_ok());
        assert_eq!(store.stats().books, 1);
    }
}
