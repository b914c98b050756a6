//! Remote Sync Adapters
//!
//! One uniform async interface over the backend, with two interchangeable
//! implementations picked by configuration: REST over HTTP, or the
//! in-process embedded store. Change notification is a polling
//! subscription for any adapter, or the store's native push events for
//! the embedded one; both deliver de-duplicated full-list snapshots.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;

use museboard_backend::domain::{
    Collection, CollectionUpdate, DomainError, NewCollection, UserProfile,
};

mod embedded;
mod rest;
mod subscription;

pub use embedded::EmbeddedAdapter;
pub use rest::RestAdapter;
pub use subscription::{
    poll_collections, watch_collections, SnapshotCallback, Subscription, DEFAULT_POLL_INTERVAL,
};

/// Errors surfaced by sync operations
#[derive(Debug)]
pub enum SyncError {
    /// Transport failure or non-2xx status
    Http(String),
    /// The backend answered `success: false`
    Backend(String),
    /// Embedded store failure
    Store(DomainError),
}

impl std::fmt::Display for SyncError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SyncError::Http(msg) => write!(f, "HTTP error: {}", msg),
            SyncError::Backend(msg) => write!(f, "Backend error: {}", msg),
            SyncError::Store(e) => write!(f, "Store error: {}", e),
        }
    }
}

impl std::error::Error for SyncError {}

impl From<reqwest::Error> for SyncError {
    fn from(e: reqwest::Error) -> Self {
        SyncError::Http(e.to_string())
    }
}

impl From<DomainError> for SyncError {
    fn from(e: DomainError) -> Self {
        SyncError::Store(e)
    }
}

pub type SyncResult<T> = Result<T, SyncError>;

/// Uniform contract over every backend variant
#[async_trait]
pub trait SyncAdapter: Send + Sync {
    /// All collections, last-edited first
    async fn list(&self) -> SyncResult<Vec<Collection>>;

    /// Publish a new draft; the backend assigns id and timestamp
    async fn create(&self, draft: NewCollection) -> SyncResult<Collection>;

    /// Merge fields into an existing collection and bump its timestamp
    async fn update(&self, id: &str, updates: CollectionUpdate) -> SyncResult<()>;

    /// Delete by id
    async fn remove(&self, id: &str) -> SyncResult<()>;

    /// The singleton profile, None before the first save
    async fn get_profile(&self) -> SyncResult<Option<UserProfile>>;

    /// Merge-upsert the singleton profile
    async fn save_profile(&self, avatar: &str) -> SyncResult<()>;
}

/// Which backend to talk to, decided at startup
#[derive(Debug, Clone)]
pub enum BackendConfig {
    /// In-process store; `None` keeps everything in memory
    Embedded { db_path: Option<PathBuf> },
    /// REST endpoints, e.g. `http://localhost:3000/api`
    Rest { base_url: String },
}

/// Build the configured adapter
pub fn connect(config: &BackendConfig) -> Arc<dyn SyncAdapter> {
    match config {
        BackendConfig::Embedded { db_path: Some(path) } => Arc::new(EmbeddedAdapter::open(path)),
        BackendConfig::Embedded { db_path: None } => Arc::new(EmbeddedAdapter::in_memory()),
        BackendConfig::Rest { base_url } => Arc::new(RestAdapter::new(base_url.clone())),
    }
}
