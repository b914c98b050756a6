//! Embedded Adapter
//!
//! Drives the document stores in-process, the way the direct-SDK
//! backend variants did. The only adapter with native push events.

use std::path::Path;

use async_trait::async_trait;
use tokio::sync::broadcast;

use museboard_backend::domain::{Collection, CollectionUpdate, NewCollection, UserProfile};
use museboard_backend::{open_stores, AppStores};

use super::{SyncAdapter, SyncResult};

pub struct EmbeddedAdapter {
    stores: AppStores,
}

impl EmbeddedAdapter {
    pub fn new(stores: AppStores) -> Self {
        Self { stores }
    }

    /// SQLite-backed; falls back to memory if the database is unusable
    pub fn open(db_path: &Path) -> Self {
        Self::new(open_stores(db_path))
    }

    pub fn in_memory() -> Self {
        Self::new(AppStores::in_memory())
    }

    /// Native change events: one per committed collection write
    pub fn subscribe_changes(&self) -> broadcast::Receiver<()> {
        self.stores.collections.subscribe_changes()
    }
}

#[async_trait]
impl SyncAdapter for EmbeddedAdapter {
    async fn list(&self) -> SyncResult<Vec<Collection>> {
        Ok(self.stores.collections.list().await?)
    }

    async fn create(&self, draft: NewCollection) -> SyncResult<Collection> {
        Ok(self.stores.collections.create(draft).await?)
    }

    async fn update(&self, id: &str, updates: CollectionUpdate) -> SyncResult<()> {
        self.stores.collections.update(id, updates).await?;
        Ok(())
    }

    async fn remove(&self, id: &str) -> SyncResult<()> {
        Ok(self.stores.collections.delete(id).await?)
    }

    async fn get_profile(&self) -> SyncResult<Option<UserProfile>> {
        Ok(self.stores.profiles.get().await?)
    }

    async fn save_profile(&self, avatar: &str) -> SyncResult<()> {
        self.stores.profiles.save(avatar).await?;
        Ok(())
    }
}
