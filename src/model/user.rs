//! User entity.

use crate::storage::StorageError;

/// A registered user.
///
/// `id` is absent until the row has been written and the store has reported
/// the identifier it generated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: Option<i64>,
    name: String,
    gender: String,
}

impl User {
    pub fn new(name: impl Into<String>, gender: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            gender: gender.into(),
        }
    }

    pub fn id(&self) -> Option<i64> {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn gender(&self) -> &str {
        &self.gender
    }

    /// Record the store-generated id. A user is assigned an id at most once.
    pub fn assign_id(&mut self, id: i64) -> Result<(), StorageError> {
        match self.id {
            Some(existing) => Err(StorageError::IdAlreadyAssigned { id: existing }),
            None => {
                self.id = Some(id);
                Ok(())
            }
        }
    }
}
