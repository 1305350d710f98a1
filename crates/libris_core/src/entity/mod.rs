//! Catalog entities and their storage-record conversion.

mod book;
mod checkout;
mod user;
pub(crate) mod validate;

pub use book::Book;
pub use checkout::Checkout;
pub use user::User;

use crate::error::{CoreError, CoreResult};
use std::collections::BTreeMap;
use std::fmt;

/// A stored record: one field mapping inside a snapshot collection.
pub type Record = BTreeMap<String, String>;

/// The named collections a snapshot is made of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    /// The `books` collection.
    Books,
    /// The `users` collection.
    Users,
    /// The `checkouts` collection.
    Checkouts,
}

impl Collection {
    /// All collections, in snapshot order.
    pub const ALL: [Self; 3] = [Self::Books, Self::Users, Self::Checkouts];

    /// Returns the collection's name in the snapshot document.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Books => "books",
            Self::Users => "users",
            Self::Checkouts => "checkouts",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Trait for types that can be stored in a snapshot collection.
///
/// Implementors name the collection they live in and the field that
/// identifies them within it, and convert to and from a [`Record`].
/// `from_record` must go through the type's validating constructor so that
/// hand-edited storage cannot bypass validation.
pub trait Entity: Sized {
    /// Collection this entity is stored in.
    const COLLECTION: Collection;

    /// Record field holding the identity key.
    const KEY_FIELD: &'static str;

    /// Human-readable entity name for error messages.
    const NAME: &'static str;

    /// Returns the identity key.
    fn key(&self) -> &str;

    /// Converts the entity to a storage record.
    fn to_record(&self) -> Record;

    /// Rebuilds the entity from a storage record.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if a field is missing or fails validation.
    fn from_record(record: &Record) -> CoreResult<Self>;
}

/// Looks up a required field in a record.
pub(crate) fn field<'a>(
    record: &'a Record,
    collection: Collection,
    name: &str,
) -> CoreResult<&'a str> {
    record.get(name).map(String::as_str).ok_or_else(|| {
        CoreError::invalid_argument(format!(
            "record in {collection} is missing field `{name}`"
        ))
    })
}
