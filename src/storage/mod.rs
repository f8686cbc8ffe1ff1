//! User record storage behind one narrow interface.
//!
//! Two interchangeable backends selected by DSN scheme: SQLite for
//! persistence and an in-memory map for transient runs. Name uniqueness is
//! enforced by the backend itself; callers must treat `StoreError::Duplicate`
//! from `create_user` as the authoritative signal, not a prior lookup.

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use url::Url;
use utoipa::ToSchema;
use uuid::Uuid;

mod memory;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

/// A stored user. The password hash is crate-private and never serialized;
/// external callers only ever see the [`PublicUser`] projection.
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub id: Uuid,
    pub name: String,
    pub(crate) password_hash: String,
    pub created_at: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
}

impl UserRecord {
    /// Projection safe to return to clients.
    #[must_use]
    pub fn public(&self) -> PublicUser {
        PublicUser {
            name: self.name.clone(),
            created_at: self.created_at,
            last_login: self.last_login,
        }
    }
}

/// User view with the password hash stripped.
#[derive(ToSchema, Serialize, Debug, Clone)]
pub struct PublicUser {
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("user {0:?} already exists")]
    Duplicate(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Storage backend selected at startup, shared by cloning.
#[derive(Clone)]
pub enum UserStore {
    Sqlite(SqliteStore),
    Memory(Arc<MemoryStore>),
}

impl UserStore {
    /// Connect to the backend named by the DSN.
    ///
    /// `sqlite://...` (including `sqlite::memory:`) opens a SQLite database,
    /// creating the file and schema when missing; `memory://` keeps records
    /// in a process-local map.
    ///
    /// # Errors
    /// Returns an error for unknown schemes or when SQLite cannot be opened.
    pub async fn connect(dsn: &str) -> Result<Self> {
        let scheme = Url::parse(dsn)
            .map(|url| url.scheme().to_string())
            .unwrap_or_else(|_| dsn.split(':').next().unwrap_or_default().to_string());

        match scheme.as_str() {
            "sqlite" => Ok(Self::Sqlite(SqliteStore::connect(dsn).await?)),
            "memory" => Ok(Self::Memory(Arc::new(MemoryStore::new()))),
            other => anyhow::bail!("unsupported store DSN scheme: {other:?}"),
        }
    }

    /// Persist a new user. `StoreError::Duplicate` when the name is taken.
    pub async fn create_user(
        &self,
        name: &str,
        password_hash: &str,
    ) -> Result<UserRecord, StoreError> {
        match self {
            Self::Sqlite(store) => store.create_user(name, password_hash).await,
            Self::Memory(store) => store.create_user(name, password_hash),
        }
    }

    pub async fn find_by_name(&self, name: &str) -> Result<Option<UserRecord>, StoreError> {
        match self {
            Self::Sqlite(store) => store.find_by_name(name).await,
            Self::Memory(store) => Ok(store.find_by_name(name)),
        }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<UserRecord>, StoreError> {
        match self {
            Self::Sqlite(store) => store.find_by_id(id).await,
            Self::Memory(store) => Ok(store.find_by_id(id)),
        }
    }

    /// All users, newest creation first.
    pub async fn list_users(&self) -> Result<Vec<UserRecord>, StoreError> {
        match self {
            Self::Sqlite(store) => store.list_users().await,
            Self::Memory(store) => Ok(store.list_users()),
        }
    }

    pub async fn count_users(&self) -> Result<i64, StoreError> {
        match self {
            Self::Sqlite(store) => store.count_users().await,
            Self::Memory(store) => Ok(store.count_users()),
        }
    }

    /// Record a successful login and return the new timestamp.
    pub async fn touch_last_login(&self, id: Uuid) -> Result<DateTime<Utc>, StoreError> {
        match self {
            Self::Sqlite(store) => store.touch_last_login(id).await,
            Self::Memory(store) => store.touch_last_login(id).map_err(StoreError::Other),
        }
    }

    /// Liveness probe used by the health endpoint.
    pub async fn ping(&self) -> Result<()> {
        match self {
            Self::Sqlite(store) => store.ping().await,
            Self::Memory(_) => Ok(()),
        }
    }
}

impl std::fmt::Debug for UserStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(_) => f.write_str("UserStore::Sqlite"),
            Self::Memory(_) => f.write_str("UserStore::Memory"),
        }
    }
}
