//! SQLite-backed contact storage

use std::fs;
use std::path::Path;
use std::str::FromStr;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{Row, SqlitePool};

use super::{ContactStore, StoreError, StoreResult};
use crate::domain::contact::{Contact, ContactFields, ContactId, User, UserId};

const CONTACT_COLUMNS: &str = "contact_id, name, phone, user_id";

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                StoreError::ConstraintViolation(db_err.message().to_string())
            }
            _ => StoreError::Backend(err.to_string()),
        }
    }
}

#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Opens (creating if needed) the database at `database_url` and applies the schema.
    pub async fn new(database_url: &str) -> StoreResult<Self> {
        if database_url.contains(":memory:") {
            return Self::in_memory().await;
        }

        let options = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .foreign_keys(true);

        create_file_parent(options.get_filename())?;

        let pool = SqlitePoolOptions::new().connect_with(options).await?;
        Self::with_pool(pool).await
    }

    /// Private database living as long as the store. A single connection that is
    /// never recycled keeps every query on the same database.
    pub async fn in_memory() -> StoreResult<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;
        Self::with_pool(pool).await
    }

    async fn with_pool(pool: SqlitePool) -> StoreResult<Self> {
        let migration_sql = include_str!("../../migrations/001_initial_schema.sql");
        sqlx::raw_sql(migration_sql).execute(&pool).await?;

        tracing::debug!("Contact schema ready");
        Ok(Self { pool })
    }

    fn row_to_contact(row: &SqliteRow) -> StoreResult<Contact> {
        Ok(Contact {
            contact_id: row.try_get("contact_id")?,
            name: row.try_get("name")?,
            phone: row.try_get("phone")?,
            user_id: row.try_get("user_id")?,
        })
    }
}

fn create_file_parent(path: &Path) -> StoreResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        fs::create_dir_all(parent).map_err(|e| {
            StoreError::Backend(format!("cannot create {}: {}", parent.display(), e))
        })?;
    }
    Ok(())
}

#[async_trait]
impl ContactStore for SqliteStore {
    async fn insert_contact(&self, owner: UserId, fields: &ContactFields) -> StoreResult<Contact> {
        let row = sqlx::query(&format!(
            "INSERT INTO contacts (name, phone, user_id) VALUES (?, ?, ?) RETURNING {CONTACT_COLUMNS}"
        ))
        .bind(fields.name())
        .bind(fields.phone())
        .bind(owner)
        .fetch_one(&self.pool)
        .await?;

        Self::row_to_contact(&row)
    }

    async fn update_owned_contact(
        &self,
        contact_id: ContactId,
        owner: UserId,
        fields: &ContactFields,
    ) -> StoreResult<Option<Contact>> {
        let row = sqlx::query(&format!(
            "UPDATE contacts SET name = ?, phone = ?
             WHERE contact_id = ? AND user_id = ?
             RETURNING {CONTACT_COLUMNS}"
        ))
        .bind(fields.name())
        .bind(fields.phone())
        .bind(contact_id)
        .bind(owner)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(Self::row_to_contact).transpose()
    }

    async fn delete_owned_contact(&self, contact_id: ContactId, owner: UserId) -> StoreResult<u64> {
        let result = sqlx::query("DELETE FROM contacts WHERE contact_id = ? AND user_id = ?")
            .bind(contact_id)
            .bind(owner)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn get_contact(&self, contact_id: ContactId) -> StoreResult<Option<Contact>> {
        let row = sqlx::query(&format!(
            "SELECT {CONTACT_COLUMNS} FROM contacts WHERE contact_id = ?"
        ))
        .bind(contact_id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(Self::row_to_contact).transpose()
    }

    async fn count_contacts(&self) -> StoreResult<u64> {
        let row = sqlx::query("SELECT COUNT(*) AS count FROM contacts")
            .fetch_one(&self.pool)
            .await?;
        let count: i64 = row.try_get("count")?;

        Ok(count as u64)
    }

    async fn create_user(&self, username: &str, password: &str) -> StoreResult<User> {
        let row = sqlx::query(
            "INSERT INTO users (username, password) VALUES (?, ?)
             RETURNING user_id, username, password",
        )
        .bind(username)
        .bind(password)
        .fetch_one(&self.pool)
        .await?;

        Ok(User {
            user_id: row.try_get("user_id")?,
            username: row.try_get("username")?,
            password: row.try_get("password")?,
        })
    }

    fn get_medium(&self) -> &str {
        "sqlite"
    }
}
