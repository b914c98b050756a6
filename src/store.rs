//! Application State Store
//!
//! Holds the collection list, the active view with per-view scroll
//! memory, and the avatar. The collection list is only ever replaced
//! whole: the subscription callback and local handlers both install
//! full snapshots, never in-place patches.

use std::sync::Arc;
use std::time::Duration;

use museboard_backend::domain::Collection;
use tokio::sync::Mutex;

use crate::constants::DEFAULT_AVATAR;
use crate::prefs::{LocalPrefs, PrefsFile};
use crate::sync::{poll_collections, Subscription, SyncAdapter, SyncResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    Home,
    Profile,
    Detail,
    Create,
}

/// The two top-level tabs that remember their scroll position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Home,
    Profile,
}

pub struct AppStore {
    adapter: Arc<dyn SyncAdapter>,
    prefs: PrefsFile,
    collections: Vec<Collection>,
    view: ViewState,
    selected_id: Option<String>,
    scroll_home: f32,
    scroll_profile: f32,
    avatar: String,
}

impl AppStore {
    pub fn new(adapter: Arc<dyn SyncAdapter>, prefs: PrefsFile) -> Self {
        let avatar = prefs
            .read()
            .avatar
            .unwrap_or_else(|| DEFAULT_AVATAR.to_string());
        Self {
            adapter,
            prefs,
            collections: Vec::new(),
            view: ViewState::Home,
            selected_id: None,
            scroll_home: 0.0,
            scroll_profile: 0.0,
            avatar,
        }
    }

    pub fn view(&self) -> ViewState {
        self.view
    }

    pub fn collections(&self) -> &[Collection] {
        &self.collections
    }

    pub fn avatar(&self) -> &str {
        &self.avatar
    }

    /// Replace the whole collection snapshot
    pub fn apply_snapshot(&mut self, collections: Vec<Collection>) {
        self.collections = collections;
    }

    /// Pull the remote avatar once at startup. A missing profile or a
    /// failed fetch keeps the local value.
    pub async fn load_profile(&mut self) {
        match self.adapter.get_profile().await {
            Ok(Some(profile)) if !profile.avatar.is_empty() => {
                self.avatar = profile.avatar.clone();
                if let Err(e) = self.prefs.write(&LocalPrefs {
                    avatar: Some(profile.avatar),
                }) {
                    log::warn!("Failed to persist avatar locally: {}", e);
                }
            }
            Ok(_) => {}
            Err(e) => log::error!("Error fetching profile: {}", e),
        }
    }

    /// Optimistic avatar update: local value and the preference file
    /// change immediately; the remote save is fire-and-forget and its
    /// failure is only logged, never rolled back.
    pub fn update_avatar(&mut self, url: String) {
        self.avatar = url.clone();
        if let Err(e) = self.prefs.write(&LocalPrefs {
            avatar: Some(url.clone()),
        }) {
            log::warn!("Failed to persist avatar locally: {}", e);
        }

        let adapter = self.adapter.clone();
        tokio::spawn(async move {
            if let Err(e) = adapter.save_profile(&url).await {
                log::error!("Failed to save avatar remotely: {}", e);
            }
        });
    }

    /// Open a collection's detail view, remembering where the current
    /// tab was scrolled to
    pub fn open_collection(&mut self, id: impl Into<String>, scroll_y: f32) {
        match self.view {
            ViewState::Home => self.scroll_home = scroll_y,
            ViewState::Profile => self.scroll_profile = scroll_y,
            _ => {}
        }
        self.selected_id = Some(id.into());
        self.view = ViewState::Detail;
    }

    pub fn select_tab(&mut self, tab: Tab) {
        self.view = match tab {
            Tab::Home => ViewState::Home,
            Tab::Profile => ViewState::Profile,
        };
        self.selected_id = None;
    }

    /// Return from the detail view; the selection is dropped
    pub fn back_from_detail(&mut self) {
        self.view = ViewState::Home;
        self.selected_id = None;
    }

    pub fn start_create(&mut self) {
        self.view = ViewState::Create;
    }

    /// Saved scroll offset for a tab, restored on return navigation
    pub fn scroll_offset(&self, tab: Tab) -> f32 {
        match tab {
            Tab::Home => self.scroll_home,
            Tab::Profile => self.scroll_profile,
        }
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected_id.as_deref()
    }

    /// The collection under the detail view; falls back to the first
    /// one when the selected id has vanished from the snapshot
    pub fn selected_collection(&self) -> Option<&Collection> {
        self.selected_id
            .as_deref()
            .and_then(|id| self.collections.iter().find(|c| c.id == id))
            .or_else(|| self.collections.first())
    }

    /// Delete the given collection remotely, then leave its detail view.
    /// Failures propagate so the UI can ask the user to retry.
    pub async fn delete_collection(&mut self, id: &str) -> SyncResult<()> {
        self.adapter.remove(id).await?;
        self.back_from_detail();
        Ok(())
    }
}

/// Wire a polling subscription into a shared store: every changed
/// snapshot replaces the store's list whole.
pub fn attach_polling(
    store: Arc<Mutex<AppStore>>,
    adapter: Arc<dyn SyncAdapter>,
    interval: Duration,
) -> Subscription {
    poll_collections(
        adapter,
        interval,
        Arc::new(move |snapshot| {
            let store = store.clone();
            tokio::spawn(async move {
                store.lock().await.apply_snapshot(snapshot);
            });
        }),
    )
}
