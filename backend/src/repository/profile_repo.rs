//! Profile Repository
//!
//! SQLite-backed store of the singleton profile document. The row is
//! created on first save and merged on later saves.

use std::sync::Arc;

use async_trait::async_trait;
use rusqlite::{params, Connection};
use tokio::sync::Mutex;

use crate::domain::{DomainError, DomainResult, UserProfile, PROFILE_DOC_ID};

use super::traits::ProfileStore;

pub struct SqliteProfileStore {
    conn: Arc<Mutex<Option<Connection>>>,
}

impl SqliteProfileStore {
    pub fn new(conn: Arc<Mutex<Option<Connection>>>) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl ProfileStore for SqliteProfileStore {
    async fn get(&self) -> DomainResult<Option<UserProfile>> {
        let guard = self.conn.lock().await;
        let conn = guard
            .as_ref()
            .ok_or(DomainError::Internal("Database not initialized".to_string()))?;

        let mut stmt = conn
            .prepare("SELECT avatar FROM users WHERE id = ?")
            .map_err(|e| DomainError::Internal(e.to_string()))?;
        let mut rows = stmt
            .query(params![PROFILE_DOC_ID])
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        if let Ok(Some(row)) = rows.next() {
            let avatar: String = row
                .get(0)
                .map_err(|e| DomainError::Internal(e.to_string()))?;
            Ok(Some(UserProfile::new(avatar)))
        } else {
            Ok(None)
        }
    }

    async fn save(&self, avatar: &str) -> DomainResult<UserProfile> {
        let guard = self.conn.lock().await;
        let conn = guard
            .as_ref()
            .ok_or(DomainError::Internal("Database not initialized".to_string()))?;

        conn.execute(
            "INSERT INTO users (id, avatar) VALUES (?, ?)
             ON CONFLICT(id) DO UPDATE SET avatar = excluded.avatar",
            params![PROFILE_DOC_ID, avatar],
        )
        .map_err(|e| DomainError::Internal(e.to_string()))?;

        Ok(UserProfile::new(avatar))
    }
}
