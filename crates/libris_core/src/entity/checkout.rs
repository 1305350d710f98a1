//! Checkout entity.

use super::{field, validate, Collection, Entity, Record};
use crate::error::CoreResult;
use std::fmt;

/// An active checkout of one book by one user.
///
/// Keyed by ISBN: a book has at most one active checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Checkout {
    user_id: String,
    isbn: String,
}

impl Checkout {
    /// Creates a validated checkout.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if the user id is empty or not numeric, or
    /// the ISBN is not exactly 10 or 13 digits.
    pub fn new(user_id: &str, isbn: &str) -> CoreResult<Self> {
        let user_id = validate::user_id(user_id)?;
        let isbn = validate::isbn(isbn)?;
        Ok(Self {
            user_id: user_id.to_string(),
            isbn: isbn.to_string(),
        })
    }

    /// Returns the id of the user holding the book.
    #[must_use]
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Returns the ISBN of the checked-out book.
    #[must_use]
    pub fn isbn(&self) -> &str {
        &self.isbn
    }
}

impl fmt::Display for Checkout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Checkout(User ID: {}, ISBN: {})", self.user_id, self.isbn)
    }
}

impl Entity for Checkout {
    const COLLECTION: Collection = Collection::Checkouts;
    const KEY_FIELD: &'static str = "isbn";
    const NAME: &'static str = "checkout";

    fn key(&self) -> &str {
        &self.isbn
    }

    fn to_record(&self) -> Record {
        Record::from([
            ("user_id".to_string(), self.user_id.clone()),
            ("isbn".to_string(), self.isbn.clone()),
        ])
    }

    fn from_record(record: &Record) -> CoreResult<Self> {
        Self::new(
            field(record, Self::COLLECTION, "user_id")?,
            field(record, Self::COLLECTION, "isbn")?,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;

    #[test]
    fn checkout_valid() {
        let checkout = Checkout::new("001", " 9783161484100").unwrap();
        assert_eq!(checkout.user_id(), "001");
        assert_eq!(checkout.isbn(), "9783161484100");
        assert_eq!(
            checkout.to_string(),
            "Checkout(User ID: 001, ISBN: 9783161484100)"
        );
    }

    #[test]
    fn checkout_rejects_bad_input() {
        for (user_id, isbn) in [
            ("", "9783161484100"),
            ("x1", "9783161484100"),
            ("001", ""),
            ("001", "12345"),
        ] {
            assert!(matches!(
                Checkout::new(user_id, isbn),
                Err(CoreError::InvalidArgument { .. })
            ));
        }
    }
}
