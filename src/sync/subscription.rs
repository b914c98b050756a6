//! Collection Subscriptions
//!
//! Polling and push flavors, unified on the same delivery semantics:
//! full-list snapshots, de-duplicated by comparing the serialized
//! snapshot against the previous one, so the callback only fires on an
//! actual change. Errors are logged and the subscription keeps running.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;

use museboard_backend::domain::Collection;

use super::{EmbeddedAdapter, SyncAdapter};

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

pub type SnapshotCallback = Arc<dyn Fn(Vec<Collection>) + Send + Sync>;

/// A running subscription. Cancelling stops the timer or closes the
/// listener; in-flight requests are not interrupted.
pub struct Subscription {
    handle: JoinHandle<()>,
}

impl Subscription {
    pub fn cancel(&self) {
        self.handle.abort();
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Deliver only if the serialized snapshot differs from the last one
fn deliver_if_changed(
    last_snapshot: &mut String,
    collections: Vec<Collection>,
    callback: &SnapshotCallback,
) {
    match serde_json::to_string(&collections) {
        Ok(snapshot) => {
            if snapshot != *last_snapshot {
                *last_snapshot = snapshot;
                callback(collections);
            }
        }
        Err(e) => log::error!("Failed to serialize snapshot: {}", e),
    }
}

/// Poll `adapter` every `interval`, starting immediately. Works against
/// any backend.
pub fn poll_collections(
    adapter: Arc<dyn SyncAdapter>,
    interval: Duration,
    callback: SnapshotCallback,
) -> Subscription {
    let handle = tokio::spawn(async move {
        let mut last_snapshot = String::new();
        let mut ticker = tokio::time::interval(interval);
        loop {
            // First tick completes immediately
            ticker.tick().await;
            match adapter.list().await {
                Ok(collections) => deliver_if_changed(&mut last_snapshot, collections, &callback),
                // Poll again on the next tick, the subscription survives
                Err(e) => log::error!("Polling error: {}", e),
            }
        }
    });
    Subscription { handle }
}

/// Follow the embedded store's native change events. Delivers an initial
/// snapshot, then refetches on every event.
pub fn watch_collections(
    adapter: Arc<EmbeddedAdapter>,
    callback: SnapshotCallback,
) -> Subscription {
    let mut changes = adapter.subscribe_changes();
    let handle = tokio::spawn(async move {
        let mut last_snapshot = String::new();

        match adapter.list().await {
            Ok(collections) => deliver_if_changed(&mut last_snapshot, collections, &callback),
            Err(e) => log::error!("Initial fetch failed: {}", e),
        }

        loop {
            match changes.recv().await {
                // A lagged receiver just refetches; snapshots are whole
                Ok(()) | Err(RecvError::Lagged(_)) => match adapter.list().await {
                    Ok(collections) => {
                        deliver_if_changed(&mut last_snapshot, collections, &callback)
                    }
                    Err(e) => log::error!("Watch refetch failed: {}", e),
                },
                Err(RecvError::Closed) => break,
            }
        }
    });
    Subscription { handle }
}
