//! User entity.

use super::{field, validate, Collection, Entity, Record};
use crate::error::CoreResult;
use std::fmt;

/// A registered library user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    name: String,
    user_id: String,
}

impl User {
    /// Creates a validated user.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if the name or user id is empty, or the user
    /// id contains anything other than ASCII digits.
    pub fn new(name: &str, user_id: &str) -> CoreResult<Self> {
        let name = validate::non_empty(name, "Name")?;
        let user_id = validate::user_id(user_id)?;
        Ok(Self {
            name: name.to_string(),
            user_id: user_id.to_string(),
        })
    }

    /// Returns the user's full name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the numeric user id.
    #[must_use]
    pub fn user_id(&self) -> &str {
        &self.user_id
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "User({}, {})", self.name, self.user_id)
    }
}

impl Entity for User {
    const COLLECTION: Collection = Collection::Users;
    const KEY_FIELD: &'static str = "user_id";
    const NAME: &'static str = "user";

    fn key(&self) -> &str {
        &self.user_id
    }

    fn to_record(&self) -> Record {
        Record::from([
            ("name".to_string(), self.name.clone()),
            ("user_id".to_string(), self.user_id.clone()),
        ])
    }

    fn from_record(record: &Record) -> CoreResult<Self> {
        Self::new(
            field(record, Self::COLLECTION, "name")?,
            field(record, Self::COLLECTION, "user_id")?,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;

    #[test]
    fn user_valid() {
        let user = User::new(" Jane Doe ", "002").unwrap();
        assert_eq!(user.name(), "Jane Doe");
        assert_eq!(user.user_id(), "002");
        assert_eq!(user.to_string(), "User(Jane Doe, 002)");
    }

    #[test]
    fn user_rejects_bad_input() {
        for (name, id) in [("", "001"), ("Jane", ""), ("Jane", "abc"), ("Jane", "12a")] {
            assert!(matches!(
                User::new(name, id),
                Err(CoreError::InvalidArgument { .. })
            ));
        }
    }

    #[test]
    fn user_record_conversion() {
        let user = User::new("Jane Doe", "002").unwrap();
        assert_eq!(User::from_record(&user.to_record()).unwrap(), user);
    }
}
