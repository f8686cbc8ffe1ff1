//! Transient in-memory store.
//!
//! Serves the same contract as the SQLite backend for runs that need no
//! persistence (tests, demos). All data is lost on restart.

use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use std::collections::HashMap;
use uuid::Uuid;

use super::{StoreError, UserRecord};

#[derive(Default)]
pub struct MemoryStore {
    users: RwLock<HashMap<Uuid, UserRecord>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new user. The whole check-and-insert runs under one write
    /// lock, so the map itself arbitrates concurrent signups for a name.
    pub fn create_user(&self, name: &str, password_hash: &str) -> Result<UserRecord, StoreError> {
        let mut users = self.users.write();
        if users.values().any(|user| user.name == name) {
            return Err(StoreError::Duplicate(name.to_string()));
        }
        let record = UserRecord {
            id: Uuid::new_v4(),
            name: name.to_string(),
            password_hash: password_hash.to_string(),
            created_at: Utc::now(),
            last_login: None,
        };
        users.insert(record.id, record.clone());
        Ok(record)
    }

    pub fn find_by_name(&self, name: &str) -> Option<UserRecord> {
        self.users
            .read()
            .values()
            .find(|user| user.name == name)
            .cloned()
    }

    pub fn find_by_id(&self, id: Uuid) -> Option<UserRecord> {
        self.users.read().get(&id).cloned()
    }

    /// All users, newest creation first.
    pub fn list_users(&self) -> Vec<UserRecord> {
        let mut users: Vec<UserRecord> = self.users.read().values().cloned().collect();
        users.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        users
    }

    pub fn count_users(&self) -> i64 {
        self.users.read().len() as i64
    }

    pub fn touch_last_login(&self, id: Uuid) -> Result<DateTime<Utc>> {
        let mut users = self.users.write();
        let user = users
            .get_mut(&id)
            .ok_or_else(|| anyhow!("unknown user id: {id}"))?;
        let now = Utc::now();
        user.last_login = Some(now);
        Ok(now)
    }
}
