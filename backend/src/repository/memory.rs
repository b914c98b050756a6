//! In-Memory Stores
//!
//! Used by tests and as the degraded fallback when the database cannot
//! be opened: the process keeps answering instead of crashing, it just
//! forgets on restart.

use async_trait::async_trait;
use tokio::sync::{broadcast, Mutex};

use crate::domain::{
    Collection, CollectionUpdate, DomainError, DomainResult, NewCollection, UserProfile,
};

use super::doc_id::generate_doc_id;
use super::traits::{CollectionStore, ProfileStore};

pub struct MemoryCollectionStore {
    rows: Mutex<Vec<Collection>>,
    changes: broadcast::Sender<()>,
}

impl MemoryCollectionStore {
    pub fn new() -> Self {
        let (changes, _) = broadcast::channel(16);
        Self {
            rows: Mutex::new(Vec::new()),
            changes,
        }
    }

    fn notify(&self) {
        let _ = self.changes.send(());
    }
}

impl Default for MemoryCollectionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CollectionStore for MemoryCollectionStore {
    async fn list(&self) -> DomainResult<Vec<Collection>> {
        let rows = self.rows.lock().await;
        let mut collections = rows.clone();
        collections.sort_by(|a, b| b.last_edited.cmp(&a.last_edited).then(a.id.cmp(&b.id)));
        Ok(collections)
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Collection>> {
        let rows = self.rows.lock().await;
        Ok(rows.iter().find(|c| c.id == id).cloned())
    }

    async fn create(&self, draft: NewCollection) -> DomainResult<Collection> {
        let now = chrono::Utc::now().timestamp_millis();
        let collection = Collection {
            id: generate_doc_id(&draft.title),
            title: draft.title,
            template: draft.template,
            item_count: draft.item_count,
            last_edited: now,
            created_at: now,
            cover_image: draft.cover_image,
            items: draft.items,
            is_draft: draft.is_draft,
        };
        self.rows.lock().await.push(collection.clone());
        self.notify();
        Ok(collection)
    }

    async fn update(&self, id: &str, updates: CollectionUpdate) -> DomainResult<Collection> {
        let updated = {
            let mut rows = self.rows.lock().await;
            let existing = rows
                .iter_mut()
                .find(|c| c.id == id)
                .ok_or_else(|| DomainError::NotFound(format!("Collection {}", id)))?;
            updates.apply_to(existing);
            existing.last_edited = chrono::Utc::now().timestamp_millis();
            existing.clone()
        };
        self.notify();
        Ok(updated)
    }

    async fn delete(&self, id: &str) -> DomainResult<()> {
        self.rows.lock().await.retain(|c| c.id != id);
        self.notify();
        Ok(())
    }

    fn subscribe_changes(&self) -> broadcast::Receiver<()> {
        self.changes.subscribe()
    }
}

pub struct MemoryProfileStore {
    avatar: Mutex<Option<String>>,
}

impl MemoryProfileStore {
    pub fn new() -> Self {
        Self {
            avatar: Mutex::new(None),
        }
    }
}

impl Default for MemoryProfileStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProfileStore for MemoryProfileStore {
    async fn get(&self) -> DomainResult<Option<UserProfile>> {
        let avatar = self.avatar.lock().await;
        Ok(avatar.clone().map(UserProfile::new))
    }

    async fn save(&self, avatar: &str) -> DomainResult<UserProfile> {
        *self.avatar.lock().await = Some(avatar.to_string());
        Ok(UserProfile::new(avatar))
    }
}
