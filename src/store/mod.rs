pub mod memory;
pub mod sqlite;

use core::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::contact::{Contact, ContactFields, ContactId, User, UserId};
use crate::errors::AppError;

pub use memory::MemStore;
pub use sqlite::SqliteStore;

pub type StoreResult<T> = Result<T, StoreError>;

/// Failure reported by a storage backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A uniqueness constraint rejected the write.
    ConstraintViolation(String),
    Backend(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::ConstraintViolation(detail) => {
                write!(f, "Constraint violation: {}", detail)
            }
            StoreError::Backend(detail) => write!(f, "Storage failure: {}", detail),
        }
    }
}

impl std::error::Error for StoreError {}

/// Row-level operations the contact service relies on.
///
/// Mutations are scoped by owner inside a single statement, so the
/// ownership check and the write cannot be separated by another request.
#[async_trait]
pub trait ContactStore: Send + Sync {
    async fn insert_contact(&self, owner: UserId, fields: &ContactFields) -> StoreResult<Contact>;

    /// Returns `None` when no contact with this id belongs to `owner`.
    async fn update_owned_contact(
        &self,
        contact_id: ContactId,
        owner: UserId,
        fields: &ContactFields,
    ) -> StoreResult<Option<Contact>>;

    /// Returns the number of rows removed (0 or 1).
    async fn delete_owned_contact(&self, contact_id: ContactId, owner: UserId) -> StoreResult<u64>;

    async fn get_contact(&self, contact_id: ContactId) -> StoreResult<Option<Contact>>;

    async fn count_contacts(&self) -> StoreResult<u64>;

    async fn create_user(&self, username: &str, password: &str) -> StoreResult<User>;

    fn get_medium(&self) -> &str;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageChoice {
    Sqlite,
    Mem,
}

impl StorageChoice {
    pub fn is_mem(&self) -> bool {
        matches!(self, StorageChoice::Mem)
    }

    pub fn is_which(&self) -> &str {
        if self.is_mem() { "mem" } else { "sqlite" }
    }

    pub fn from(str: &str) -> Result<Self, AppError> {
        match str.to_lowercase().as_str() {
            "sqlite" => Ok(StorageChoice::Sqlite),
            "mem" => Ok(StorageChoice::Mem),
            _ => Err(AppError::Config(format!(
                "'{}' is not a recognized storage medium",
                str
            ))),
        }
    }
}

pub async fn parse_store(
    choice: StorageChoice,
    database_url: &str,
) -> Result<Arc<dyn ContactStore>, AppError> {
    match choice {
        StorageChoice::Mem => Ok(Arc::new(MemStore::new())),
        StorageChoice::Sqlite => Ok(Arc::new(SqliteStore::new(database_url).await?)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_storage_choice() -> Result<(), AppError> {
        assert_eq!(StorageChoice::from("sqlite")?, StorageChoice::Sqlite);
        assert_eq!(StorageChoice::from("MEM")?, StorageChoice::Mem);
        assert_eq!(StorageChoice::from("mem")?.is_which(), "mem");
        assert!(matches!(
            StorageChoice::from("json"),
            Err(AppError::Config(_))
        ));
        Ok(())
    }

    #[tokio::test]
    async fn mem_choice_builds_mem_store() -> Result<(), AppError> {
        let store = parse_store(StorageChoice::Mem, "unused").await?;

        assert_eq!(store.get_medium(), "mem");
        assert_eq!(store.count_contacts().await?, 0);
        Ok(())
    }
}
