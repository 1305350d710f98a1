//! Catalog statistics.

use crate::entity::{Book, Checkout, Entity};
use crate::snapshot::Snapshot;
use serde::Serialize;
use std::collections::HashSet;

/// Record counts per collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CatalogStats {
    /// Number of books.
    pub books: usize,
    /// Number of users.
    pub users: usize,
    /// Number of active checkouts.
    pub checkouts: usize,
    /// Number of books with no active checkout.
    ///
    /// Checkouts naming a book that is not in the catalog do not count
    /// against this figure.
    pub available: usize,
}

impl CatalogStats {
    /// Counts the records in a snapshot.
    #[must_use]
    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        let checked_out: HashSet<&str> = snapshot
            .checkouts
            .iter()
            .filter_map(|r| r.get(Checkout::KEY_FIELD))
            .map(|isbn| isbn.trim())
            .collect();
        let available = snapshot
            .books
            .iter()
            .filter(|r| {
                !matches!(r.get(Book::KEY_FIELD), Some(isbn) if checked_out.contains(isbn.trim()))
            })
            .count();

        Self {
            books: snapshot.books.len(),
            users: snapshot.users.len(),
            checkouts: snapshot.checkouts.len(),
            available,
        }
    }
}
