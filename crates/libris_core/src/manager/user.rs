//! User manager.

use super::{load_index, persist, unpersist, Index};
use crate::entity::{Entity, User};
use crate::error::{CoreError, CoreResult};
use crate::store::Store;
use std::sync::Arc;
use tracing::info;

/// Manages registered users, keyed by user id.
#[derive(Debug)]
pub struct UserManager {
    users: Index<User>,
    store: Arc<Store>,
}

impl UserManager {
    /// Builds the manager from the users currently in `store`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if a stored user fails validation, or
    /// `CorruptData` if two stored users share an id.
    pub fn new(store: Arc<Store>) -> CoreResult<Self> {
        let users = load_index(&store)?;
        Ok(Self { users, store })
    }

    /// Registers a new user.
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` if the name or id is empty, or the id is not numeric
    /// - `DuplicateKey` if the id is already registered
    /// - a storage error if the catalog cannot be saved
    pub fn add_user(&mut self, name: &str, user_id: &str) -> CoreResult<&User> {
        let user = User::new(name, user_id)?;
        if self.users.contains(user.user_id()) {
            return Err(CoreError::duplicate_key(
                User::COLLECTION.name(),
                user.user_id(),
            ));
        }

        persist(&self.store, &user)?;
        info!(user_id = user.user_id(), "user added");
        Ok(self.users.insert(user))
    }

    /// Looks up a user by id.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `user_id` is empty and `NotFound` if no
    /// user has this id.
    pub fn get_user(&self, user_id: &str) -> CoreResult<&User> {
        let user_id = user_id.trim();
        if user_id.is_empty() {
            return Err(CoreError::invalid_argument("User ID must not be empty"));
        }
        self.users
            .get(user_id)
            .ok_or_else(|| CoreError::not_found(User::NAME, user_id))
    }

    /// Removes a user by id and returns it.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no user has this id, or a storage error if the
    /// catalog cannot be saved.
    pub fn remove_user(&mut self, user_id: &str) -> CoreResult<User> {
        let user_id = user_id.trim();
        if !self.users.contains(user_id) {
            return Err(CoreError::not_found(User::NAME, user_id));
        }

        unpersist::<User>(&self.store, user_id)?;
        info!(user_id, "user removed");
        self.users
            .remove(user_id)
            .ok_or_else(|| CoreError::not_found(User::NAME, user_id))
    }

    /// Returns all users in insertion order.
    #[must_use]
    pub fn list_users(&self) -> &[User] {
        self.users.as_slice()
    }

    /// Returns the number of users.
    #[must_use]
    pub fn len(&self) -> usize {
        self.users.len()
    }

    /// Returns whether no users are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.users.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager() -> UserManager {
        UserManager::new(Arc::new(Store::in_memory().unwrap())).unwrap()
    }

    #[test]
    fn add_then_get() {
        let mut users = manager();
        users.add_user("Jane Doe", "002").unwrap();
        assert_eq!(users.get_user("002").unwrap().name(), "Jane Doe");
    }

    #[test]
    fn get_empty_id_is_invalid() {
        let users = manager();
        assert!(matches!(
            users.get_user(""),
            Err(CoreError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn get_unknown_id_is_not_found() {
        let users = manager();
        assert!(matches!(
            users.get_user("999"),
            Err(CoreError::NotFound { .. })
        ));
    }

    #[test]
    fn duplicate_id_rejected() {
        let mut users = manager();
        users.add_user("John Doe", "001").unwrap();
        assert!(matches!(
            users.add_user("Johnny", "001"),
            Err(CoreError::DuplicateKey { .. })
        ));
        assert_eq!(users.len(), 1);
    }

    #[test]
    fn non_numeric_id_rejected() {
        let mut users = manager();
        assert!(matches!(
            users.add_user("John Doe", "abc"),
            Err(CoreError::InvalidArgument { .. })
        ));
        assert!(users.is_empty());
    }

    #[test]
    fn remove_user() {
        let mut users = manager();
        users.add_user("John Doe", "001").unwrap();
        users.add_user("Jane Doe", "002").unwrap();

        assert_eq!(users.remove_user("001").unwrap().name(), "John Doe");
        assert!(users.get_user("001").is_err());
        assert!(matches!(
            users.remove_user("001"),
            Err(CoreError::NotFound { .. })
        ));

        let names: Vec<_> = users.list_users().iter().map(User::name).collect();
        assert_eq!(names, ["Jane Doe"]);
        assert!(!users.store.contains(User::COLLECTION, "user_id", "001"));
    }
}
