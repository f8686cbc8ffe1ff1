//! SQLite-backed user store.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions},
    Connection, Row,
};
use std::str::FromStr;
use tracing::Instrument;
use uuid::Uuid;

use super::{StoreError, UserRecord};

#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Open (creating if missing) the database and bootstrap the schema.
    ///
    /// SQLite serializes writers anyway; a single pooled connection keeps
    /// `sqlite::memory:` databases shared across all callers as well.
    ///
    /// # Errors
    /// Returns an error if the DSN is invalid or the schema cannot be created.
    pub async fn connect(dsn: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(dsn)
            .with_context(|| format!("invalid SQLite DSN: {dsn}"))?
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .context("Failed to connect to database")?;

        let store = Self { pool };
        store.init_schema().await?;
        Ok(store)
    }

    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    async fn init_schema(&self) -> Result<()> {
        let query = r"
            CREATE TABLE IF NOT EXISTS users (
                id TEXT PRIMARY KEY,
                name TEXT UNIQUE NOT NULL,
                password_hash TEXT NOT NULL,
                created_at TEXT NOT NULL,
                last_login TEXT
            )
        ";
        let span = tracing::info_span!(
            "db.query",
            db.system = "sqlite",
            db.operation = "CREATE TABLE"
        );
        sqlx::query(query)
            .execute(&self.pool)
            .instrument(span)
            .await
            .context("failed to create users table")?;
        Ok(())
    }

    /// Insert a new user; the UNIQUE constraint on `name` is the sole
    /// arbiter between concurrent signups.
    pub async fn create_user(
        &self,
        name: &str,
        password_hash: &str,
    ) -> Result<UserRecord, StoreError> {
        let record = UserRecord {
            id: Uuid::new_v4(),
            name: name.to_string(),
            password_hash: password_hash.to_string(),
            created_at: Utc::now(),
            last_login: None,
        };

        let query = r"
            INSERT INTO users (id, name, password_hash, created_at)
            VALUES (?, ?, ?, ?)
        ";
        let span = tracing::info_span!(
            "db.query",
            db.system = "sqlite",
            db.operation = "INSERT",
            db.statement = query
        );
        let result = sqlx::query(query)
            .bind(record.id)
            .bind(&record.name)
            .bind(&record.password_hash)
            .bind(record.created_at)
            .execute(&self.pool)
            .instrument(span)
            .await;

        match result {
            Ok(_) => Ok(record),
            Err(err) if is_unique_violation(&err) => {
                Err(StoreError::Duplicate(name.to_string()))
            }
            Err(err) => Err(StoreError::Other(
                anyhow::Error::new(err).context("failed to insert user"),
            )),
        }
    }

    pub async fn find_by_name(&self, name: &str) -> Result<Option<UserRecord>, StoreError> {
        let query = r"
            SELECT id, name, password_hash, created_at, last_login
            FROM users
            WHERE name = ?
        ";
        let span = tracing::info_span!(
            "db.query",
            db.system = "sqlite",
            db.operation = "SELECT",
            db.statement = query
        );
        let row = sqlx::query(query)
            .bind(name)
            .fetch_optional(&self.pool)
            .instrument(span)
            .await
            .context("failed to lookup user by name")?;

        Ok(row.map(|row| record_from_row(&row)))
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<UserRecord>, StoreError> {
        let query = r"
            SELECT id, name, password_hash, created_at, last_login
            FROM users
            WHERE id = ?
        ";
        let span = tracing::info_span!(
            "db.query",
            db.system = "sqlite",
            db.operation = "SELECT",
            db.statement = query
        );
        let row = sqlx::query(query)
            .bind(id)
            .fetch_optional(&self.pool)
            .instrument(span)
            .await
            .context("failed to lookup user by id")?;

        Ok(row.map(|row| record_from_row(&row)))
    }

    pub async fn list_users(&self) -> Result<Vec<UserRecord>, StoreError> {
        let query = r"
            SELECT id, name, password_hash, created_at, last_login
            FROM users
            ORDER BY created_at DESC
        ";
        let span = tracing::info_span!(
            "db.query",
            db.system = "sqlite",
            db.operation = "SELECT",
            db.statement = query
        );
        let rows = sqlx::query(query)
            .fetch_all(&self.pool)
            .instrument(span)
            .await
            .context("failed to list users")?;

        Ok(rows.iter().map(record_from_row).collect())
    }

    pub async fn count_users(&self) -> Result<i64, StoreError> {
        let query = "SELECT COUNT(*) AS count FROM users";
        let span = tracing::info_span!(
            "db.query",
            db.system = "sqlite",
            db.operation = "SELECT",
            db.statement = query
        );
        let row = sqlx::query(query)
            .fetch_one(&self.pool)
            .instrument(span)
            .await
            .context("failed to count users")?;

        Ok(row.get("count"))
    }

    pub async fn touch_last_login(&self, id: Uuid) -> Result<DateTime<Utc>, StoreError> {
        let now = Utc::now();
        let query = "UPDATE users SET last_login = ? WHERE id = ?";
        let span = tracing::info_span!(
            "db.query",
            db.system = "sqlite",
            db.operation = "UPDATE",
            db.statement = query
        );
        sqlx::query(query)
            .bind(now)
            .bind(id)
            .execute(&self.pool)
            .instrument(span)
            .await
            .context("failed to update last_login")?;

        Ok(now)
    }

    /// Acquire a connection and ping it.
    pub async fn ping(&self) -> Result<()> {
        let acquire_span =
            tracing::info_span!("db.acquire", db.system = "sqlite", db.operation = "ACQUIRE");
        let mut conn = self
            .pool
            .acquire()
            .instrument(acquire_span)
            .await
            .context("failed to acquire database connection")?;

        let ping_span = tracing::info_span!("db.ping", db.system = "sqlite", db.operation = "PING");
        conn.ping()
            .instrument(ping_span)
            .await
            .context("failed to ping database")?;
        Ok(())
    }
}

fn record_from_row(row: &sqlx::sqlite::SqliteRow) -> UserRecord {
    UserRecord {
        id: row.get("id"),
        name: row.get("name"),
        password_hash: row.get("password_hash"),
        created_at: row.get("created_at"),
        last_login: row.get("last_login"),
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        // 2067 = SQLITE_CONSTRAINT_UNIQUE, 1555 = SQLITE_CONSTRAINT_PRIMARYKEY
        sqlx::Error::Database(db_err) => db_err
            .code()
            .is_some_and(|code| code.as_ref() == "2067" || code.as_ref() == "1555"),
        _ => false,
    }
}
