//! Repository Layer - Core Traits
//!
//! Abstract interfaces for data access. Implementations can use SQLite,
//! in-memory, etc. All operations are async to support various backends.

use async_trait::async_trait;
use tokio::sync::broadcast;

use crate::domain::{Collection, CollectionUpdate, DomainResult, NewCollection, UserProfile};

/// Store of collection documents
#[async_trait]
pub trait CollectionStore: Send + Sync {
    /// All collections, ordered by last-edited descending
    async fn list(&self) -> DomainResult<Vec<Collection>>;

    /// Find a collection by document id
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Collection>>;

    /// Persist a draft: assigns a document id and server timestamps and
    /// returns the stored record
    async fn create(&self, draft: NewCollection) -> DomainResult<Collection>;

    /// Merge the given fields into an existing document and bump its
    /// last-edited timestamp
    async fn update(&self, id: &str, updates: CollectionUpdate) -> DomainResult<Collection>;

    /// Delete by document id
    async fn delete(&self, id: &str) -> DomainResult<()>;

    /// Native change notification: one event per committed write.
    /// Receivers that lag simply refetch on the next event.
    fn subscribe_changes(&self) -> broadcast::Receiver<()>;
}

/// Store of the singleton user profile
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// The profile document, or None before the first save
    async fn get(&self) -> DomainResult<Option<UserProfile>>;

    /// Merge-upsert: creates the document on first save
    async fn save(&self, avatar: &str) -> DomainResult<UserProfile>;
}
