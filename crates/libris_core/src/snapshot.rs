//! Whole-catalog snapshot document.
//!
//! The snapshot is a JSON document with one array per collection:
//!
//! ```text
//! {
//!   "books":     [ { "title": .., "author": .., "isbn": .. }, ... ],
//!   "users":     [ { "name": .., "user_id": .. }, ... ],
//!   "checkouts": [ { "user_id": .., "isbn": .. }, ... ]
//! }
//! ```
//!
//! A collection missing from the document reads as empty.

use crate::entity::{Collection, Record};
use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};

/// The complete serialized state of all three collections.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Book records.
    #[serde(default)]
    pub books: Vec<Record>,
    /// User records.
    #[serde(default)]
    pub users: Vec<Record>,
    /// Checkout records.
    #[serde(default)]
    pub checkouts: Vec<Record>,
}

impl Snapshot {
    /// Returns the records of one collection.
    #[must_use]
    pub fn records(&self, collection: Collection) -> &[Record] {
        match collection {
            Collection::Books => &self.books,
            Collection::Users => &self.users,
            Collection::Checkouts => &self.checkouts,
        }
    }

    /// Returns the records of one collection for modification.
    pub fn records_mut(&mut self, collection: Collection) -> &mut Vec<Record> {
        match collection {
            Collection::Books => &mut self.books,
            Collection::Users => &mut self.users,
            Collection::Checkouts => &mut self.checkouts,
        }
    }

    /// Returns whether all collections are empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        Collection::ALL.iter().all(|&c| self.records(c).is_empty())
    }

    /// Encodes the snapshot as JSON.
    pub fn encode(&self, pretty: bool) -> CoreResult<Vec<u8>> {
        let encoded = if pretty {
            serde_json::to_vec_pretty(self)
        } else {
            serde_json::to_vec(self)
        };
        encoded.map_err(|e| CoreError::corrupt_data(format!("failed to encode snapshot: {e}")))
    }

    /// Decodes a snapshot from JSON.
    ///
    /// Empty or whitespace-only input decodes to an empty snapshot.
    pub fn decode(data: &[u8]) -> CoreResult<Self> {
        if data.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }
        serde_json::from_slice(data)
            .map_err(|e| CoreError::corrupt_data(format!("failed to decode snapshot: {e}")))
    }
}
