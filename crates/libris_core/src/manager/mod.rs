//! Entity managers.
//!
//! Each manager owns an in-memory index of one entity type, built from the
//! [`Store`](crate::Store) at construction. Mutations persist through the
//! store first and touch the index only once the store has confirmed the
//! write, so the index never holds a change that storage does not.

mod book;
mod checkout;
mod index;
mod user;

pub use book::BookManager;
pub use checkout::{CheckoutManager, CheckoutValidator, StoreReferences};
pub use user::UserManager;

use crate::entity::Entity;
use crate::error::CoreResult;
use crate::store::Store;
use index::Index;

/// Loads every entity of type `T` from the store into a fresh index.
fn load_index<T: Entity>(store: &Store) -> CoreResult<Index<T>> {
    Index::from_entities(store.get_records::<T>()?)
}

/// Persists a new entity through the store.
fn persist<T: Entity>(store: &Store, entity: &T) -> CoreResult<()> {
    store.add_record(T::COLLECTION, entity.to_record(), T::KEY_FIELD)
}

/// Removes an entity's record from the store.
fn unpersist<T: Entity>(store: &Store, key: &str) -> CoreResult<()> {
    store.remove_record(T::COLLECTION, key, T::KEY_FIELD)?;
    Ok(())
}
