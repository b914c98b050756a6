//! Collection Repository
//!
//! SQLite-backed implementation of [`CollectionStore`]. The item list is
//! serialized into the `items` JSON column; every committed write emits
//! one change event.

use std::sync::Arc;

use async_trait::async_trait;
use rusqlite::{params, Connection, Row};
use tokio::sync::{broadcast, Mutex};

use crate::domain::{
    Collection, CollectionUpdate, DomainError, DomainResult, NewCollection, Template,
};

use super::doc_id::generate_doc_id;
use super::traits::CollectionStore;

/// Capacity of the change-event channel; receivers refetch, so lagging
/// only costs a duplicate fetch.
const CHANGE_CHANNEL_CAPACITY: usize = 16;

pub struct SqliteCollectionStore {
    conn: Arc<Mutex<Option<Connection>>>,
    changes: broadcast::Sender<()>,
}

impl SqliteCollectionStore {
    pub fn new(conn: Arc<Mutex<Option<Connection>>>) -> Self {
        let (changes, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);
        Self { conn, changes }
    }

    fn notify(&self) {
        // No receivers is fine
        let _ = self.changes.send(());
    }
}

/// Convert a database row to a Collection
fn row_to_collection(row: &Row<'_>) -> DomainResult<Collection> {
    let items_json: String = row
        .get(5)
        .map_err(|e| DomainError::Internal(e.to_string()))?;
    let items = serde_json::from_str(&items_json)
        .map_err(|e| DomainError::Internal(format!("Corrupt items column: {}", e)))?;

    Ok(Collection {
        id: row.get(0).map_err(|e| DomainError::Internal(e.to_string()))?,
        title: row.get(1).map_err(|e| DomainError::Internal(e.to_string()))?,
        template: Template::from_str(
            &row.get::<_, String>(2)
                .unwrap_or_else(|_| "classic".to_string()),
        ),
        item_count: row.get::<_, i64>(3).unwrap_or(0) as u32,
        cover_image: row.get(4).unwrap_or_default(),
        items,
        last_edited: row.get(6).unwrap_or(0),
        created_at: row.get(7).unwrap_or(0),
        is_draft: row.get::<_, i64>(8).unwrap_or(0) != 0,
    })
}

const SELECT_COLUMNS: &str =
    "id, title, template, item_count, cover_image, items, last_edited, created_at, is_draft";

#[async_trait]
impl CollectionStore for SqliteCollectionStore {
    async fn list(&self) -> DomainResult<Vec<Collection>> {
        let guard = self.conn.lock().await;
        let conn = guard
            .as_ref()
            .ok_or(DomainError::Internal("Database not initialized".to_string()))?;

        let mut stmt = conn
            .prepare(&format!(
                "SELECT {} FROM collections ORDER BY last_edited DESC, id",
                SELECT_COLUMNS
            ))
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        let mut rows = stmt
            .query([])
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        let mut collections = Vec::new();
        while let Ok(Some(row)) = rows.next() {
            collections.push(row_to_collection(row)?);
        }
        Ok(collections)
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Collection>> {
        let guard = self.conn.lock().await;
        let conn = guard
            .as_ref()
            .ok_or(DomainError::Internal("Database not initialized".to_string()))?;

        let mut stmt = conn
            .prepare(&format!(
                "SELECT {} FROM collections WHERE id = ?",
                SELECT_COLUMNS
            ))
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        let mut rows = stmt
            .query(params![id])
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        if let Ok(Some(row)) = rows.next() {
            Ok(Some(row_to_collection(row)?))
        } else {
            Ok(None)
        }
    }

    async fn create(&self, draft: NewCollection) -> DomainResult<Collection> {
        let id = generate_doc_id(&draft.title);
        let now = chrono::Utc::now().timestamp_millis();
        let items_json = serde_json::to_string(&draft.items)
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        {
            let guard = self.conn.lock().await;
            let conn = guard
                .as_ref()
                .ok_or(DomainError::Internal("Database not initialized".to_string()))?;

            conn.execute(
                "INSERT INTO collections
                 (id, title, template, item_count, cover_image, items,
                  last_edited, created_at, is_draft)
                 VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
                params![
                    id,
                    draft.title,
                    draft.template.as_str(),
                    draft.item_count,
                    draft.cover_image,
                    items_json,
                    now,
                    now,
                    draft.is_draft as i64,
                ],
            )
            .map_err(|e| DomainError::Internal(e.to_string()))?;
        }

        self.notify();
        Ok(Collection {
            id,
            title: draft.title,
            template: draft.template,
            item_count: draft.item_count,
            last_edited: now,
            created_at: now,
            cover_image: draft.cover_image,
            items: draft.items,
            is_draft: draft.is_draft,
        })
    }

    async fn update(&self, id: &str, updates: CollectionUpdate) -> DomainResult<Collection> {
        let now = chrono::Utc::now().timestamp_millis();

        let updated = {
            let guard = self.conn.lock().await;
            let conn = guard
                .as_ref()
                .ok_or(DomainError::Internal("Database not initialized".to_string()))?;

            let mut existing = {
                let mut stmt = conn
                    .prepare(&format!(
                        "SELECT {} FROM collections WHERE id = ?",
                        SELECT_COLUMNS
                    ))
                    .map_err(|e| DomainError::Internal(e.to_string()))?;
                let mut rows = stmt
                    .query(params![id])
                    .map_err(|e| DomainError::Internal(e.to_string()))?;
                match rows.next() {
                    Ok(Some(row)) => row_to_collection(row)?,
                    _ => return Err(DomainError::NotFound(format!("Collection {}", id))),
                }
            };

            updates.apply_to(&mut existing);
            existing.last_edited = now;

            let items_json = serde_json::to_string(&existing.items)
                .map_err(|e| DomainError::Internal(e.to_string()))?;
            conn.execute(
                "UPDATE collections SET title = ?, template = ?, item_count = ?,
                 cover_image = ?, items = ?, last_edited = ?, is_draft = ?
                 WHERE id = ?",
                params![
                    existing.title,
                    existing.template.as_str(),
                    existing.item_count,
                    existing.cover_image,
                    items_json,
                    existing.last_edited,
                    existing.is_draft as i64,
                    id,
                ],
            )
            .map_err(|e| DomainError::Internal(e.to_string()))?;

            existing
        };

        self.notify();
        Ok(updated)
    }

    async fn delete(&self, id: &str) -> DomainResult<()> {
        {
            let guard = self.conn.lock().await;
            let conn = guard
                .as_ref()
                .ok_or(DomainError::Internal("Database not initialized".to_string()))?;

            conn.execute("DELETE FROM collections WHERE id = ?", params![id])
                .map_err(|e| DomainError::Internal(e.to_string()))?;
        }
        self.notify();
        Ok(())
    }

    fn subscribe_changes(&self) -> broadcast::Receiver<()> {
        self.changes.subscribe()
    }
}
