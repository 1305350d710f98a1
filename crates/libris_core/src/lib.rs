//! # Libris Core
//!
//! Record management for a small library catalog.
//!
//! This crate provides:
//! - Validated, immutable entities: [`Book`], [`User`], [`Checkout`]
//! - A [`Store`] that keeps a whole-catalog [`Snapshot`] in sync with a
//!   snapshot backend
//! - Entity managers that index each collection in memory and enforce
//!   identity-key uniqueness
//! - The [`Library`] facade that wires them together from a [`Config`]
//!
//! Every mutation is persisted before it is applied in memory: if the
//! snapshot cannot be written, the call fails and nothing changes.

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod entity;
mod error;
mod library;
mod manager;
mod snapshot;
mod stats;
mod store;

pub use config::{Config, DEFAULT_DATA_FILE};
pub use entity::{Book, Checkout, Collection, Entity, Record, User};
pub use error::{CoreError, CoreResult};
pub use library::Library;
pub use manager::{BookManager, CheckoutManager, CheckoutValidator, StoreReferences, UserManager};
pub use snapshot::Snapshot;
pub use stats::CatalogStats;
pub use store::Store;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
