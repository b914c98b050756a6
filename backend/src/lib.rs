//! Museboard Backend
//!
//! Layered architecture:
//! - domain: Core entities and business rules
//! - repository: Data access abstractions and implementations
//! - api: HTTP CRUD surface
//!
//! The `museboard-server` binary serves the api; the client crate links
//! this library directly for its embedded (in-process) adapter.

use std::path::Path;
use std::sync::Arc;

pub mod api;
pub mod config;
pub mod domain;
pub mod repository;
pub mod seed;

use repository::{
    CollectionStore, MemoryCollectionStore, MemoryProfileStore, ProfileStore,
    SqliteCollectionStore, SqliteProfileStore,
};

/// The pair of stores every surface works against
#[derive(Clone)]
pub struct AppStores {
    pub collections: Arc<dyn CollectionStore>,
    pub profiles: Arc<dyn ProfileStore>,
}

impl AppStores {
    /// Purely in-memory stores (tests, degraded mode)
    pub fn in_memory() -> Self {
        Self {
            collections: Arc::new(MemoryCollectionStore::new()),
            profiles: Arc::new(MemoryProfileStore::new()),
        }
    }
}

/// Open the SQLite stores at `db_path`. A broken or unopenable database
/// is logged and degrades to in-memory stores so the process keeps
/// answering instead of crashing.
pub fn open_stores(db_path: &Path) -> AppStores {
    match repository::init_db(db_path) {
        Ok(db_state) => AppStores {
            collections: Arc::new(SqliteCollectionStore::new(db_state.connection())),
            profiles: Arc::new(SqliteProfileStore::new(db_state.connection())),
        },
        Err(e) => {
            log::error!(
                "Database at {} unavailable ({}), serving from memory",
                db_path.display(),
                e
            );
            AppStores::in_memory()
        }
    }
}
