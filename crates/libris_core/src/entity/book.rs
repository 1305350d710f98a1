//! Book entity.

use super::{field, validate, Collection, Entity, Record};
use crate::error::CoreResult;
use std::fmt;

/// A single book in the catalog.
///
/// Identified by its ISBN. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
    title: String,
    author: String,
    isbn: String,
}

impl Book {
    /// Creates a validated book.
    ///
    /// All fields are trimmed before being stored.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if any field is empty or the ISBN is not
    /// exactly 10 or 13 digits.
    pub fn new(title: &str, author: &str, isbn: &str) -> CoreResult<Self> {
        let title = validate::non_empty(title, "Title")?;
        let author = validate::non_empty(author, "Author")?;
        let isbn = validate::isbn(isbn)?;
        Ok(Self {
            title: title.to_string(),
            author: author.to_string(),
            isbn: isbn.to_string(),
        })
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the author.
    #[must_use]
    pub fn author(&self) -> &str {
        &self.author
    }

    /// Returns the ISBN.
    #[must_use]
    pub fn isbn(&self) -> &str {
        &self.isbn
    }
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} by {}, ISBN: {}", self.title, self.author, self.isbn)
    }
}

impl Entity for Book {
    const COLLECTION: Collection = Collection::Books;
    const KEY_FIELD: &'static str = "isbn";
    const NAME: &'static str = "book";

    fn key(&self) -> &str {
        &self.isbn
    }

    fn to_record(&self) -> Record {
        Record::from([
            ("title".to_string(), self.title.clone()),
            ("author".to_string(), self.author.clone()),
            ("isbn".to_string(), self.isbn.clone()),
        ])
    }

    fn from_record(record: &Record) -> CoreResult<Self> {
        Self::new(
            field(record, Self::COLLECTION, "title")?,
            field(record, Self::COLLECTION, "author")?,
            field(record, Self::COLLECTION, "isbn")?,
        )
    }
}
