//! # Libris Storage
//!
//! Snapshot backends for the Libris catalog.
//!
//! A backend is an **opaque snapshot store**: it holds exactly one byte
//! buffer, the last snapshot written, and knows nothing about the document
//! format inside it. Libris core owns all interpretation of those bytes.
//!
//! ## Design Principles
//!
//! - A snapshot is read whole and replaced whole
//! - Replacement is atomic: a reader sees either the old or the new bytes
//! - "Nothing stored yet" is a normal state, reported as `None`
//! - Backends must be `Send + Sync`
//!
//! ## Available Backends
//!
//! - [`InMemoryBackend`] - For testing and ephemeral catalogs
//! - [`FileBackend`] - For persistent storage using write-then-rename
//!
//! ## Example
//!
//! ```rust
//! use libris_storage::{InMemoryBackend, SnapshotBackend};
//!
//! let mut backend = InMemoryBackend::new();
//! assert!(backend.read().unwrap().is_none());
//!
//! backend.replace(b"{\"books\":[]}").unwrap();
//! assert_eq!(backend.read().unwrap().unwrap(), b"{\"books\":[]}");
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod backend;
mod error;
mod file;
mod memory;

pub use backend::SnapshotBackend;
pub use error::{StorageError, StorageResult};
pub use file::FileBackend;
pub use memory::InMemoryBackend;
