//! Insertion-ordered in-memory index.

use crate::entity::Entity;
use crate::error::{CoreError, CoreResult};
use std::collections::HashMap;

/// An ordered mapping from identity key to owned entity.
///
/// Iteration follows insertion order: load order first, then appends.
/// Removal preserves the relative order of the remaining entries.
#[derive(Debug)]
pub(crate) struct Index<T: Entity> {
    entries: Vec<T>,
    positions: HashMap<String, usize>,
}

impl<T: Entity> Index<T> {
    /// Builds an index from loaded entities.
    ///
    /// Returns `CorruptData` if two entities share a key.
    pub(crate) fn from_entities(entities: Vec<T>) -> CoreResult<Self> {
        let mut positions = HashMap::with_capacity(entities.len());
        for (pos, entity) in entities.iter().enumerate() {
            if positions.insert(entity.key().to_string(), pos).is_some() {
                return Err(CoreError::corrupt_data(format!(
                    "duplicate {} key {} in {}",
                    T::KEY_FIELD,
                    entity.key(),
                    T::COLLECTION
                )));
            }
        }
        Ok(Self {
            entries: entities,
            positions,
        })
    }

    pub(crate) fn get(&self, key: &str) -> Option<&T> {
        self.positions.get(key).map(|&pos| &self.entries[pos])
    }

    pub(crate) fn contains(&self, key: &str) -> bool {
        self.positions.contains_key(key)
    }

    /// Appends an entity whose key is not yet present.
    pub(crate) fn insert(&mut self, entity: T) -> &T {
        debug_assert!(!self.contains(entity.key()));
        let pos = self.entries.len();
        self.positions.insert(entity.key().to_string(), pos);
        self.entries.push(entity);
        &self.entries[pos]
    }

    pub(crate) fn remove(&mut self, key: &str) -> Option<T> {
        let pos = self.positions.remove(key)?;
        let entity = self.entries.remove(pos);
        for shifted in &self.entries[pos..] {
            if let Some(p) = self.positions.get_mut(shifted.key()) {
                *p -= 1;
            }
        }
        Some(entity)
    }

    pub(crate) fn as_slice(&self) -> &[T] {
        &self.entries
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::User;

    fn user(id: &str) -> User {
        User::new("Reader", id).unwrap()
    }

    fn ids(index: &Index<User>) -> Vec<&str> {
        index.as_slice().iter().map(User::user_id).collect()
    }

    #[test]
    fn keeps_insertion_order_across_removal() {
        let mut index = Index::from_entities(vec![user("3"), user("1")]).unwrap();
        index.insert(user("2"));
        index.insert(user("5"));

        assert_eq!(index.remove("1").unwrap().user_id(), "1");
        assert_eq!(ids(&index), ["3", "2", "5"]);
        assert_eq!(index.get("5").unwrap().user_id(), "5");
        assert_eq!(index.get("2").unwrap().user_id(), "2");
        assert!(index.get("1").is_none());
        assert_eq!(index.len(), 3);
    }

    #[test]
    fn remove_missing_is_none() {
        let mut index: Index<User> = Index::from_entities(Vec::new()).unwrap();
        assert!(index.remove("1").is_none());
    }

    #[test]
    fn duplicate_keys_are_corrupt() {
        let result = Index::from_entities(vec![user("1"), user("1")]);
        assert!(matches!(result, Err(CoreError::CorruptData { .. })));
    }
}
