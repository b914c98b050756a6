//! Local Preferences
//!
//! A small JSON file standing in for the browser's local storage:
//! currently just the avatar. Reads treat a missing or corrupt file as
//! empty; writes go through whole.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LocalPrefs {
    pub avatar: Option<String>,
}

pub struct PrefsFile {
    path: PathBuf,
}

impl PrefsFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn read(&self) -> LocalPrefs {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|e| {
                log::warn!("Corrupt prefs file {}: {}", self.path.display(), e);
                LocalPrefs::default()
            }),
            Err(e) if e.kind() == ErrorKind::NotFound => LocalPrefs::default(),
            Err(e) => {
                log::warn!("Failed to read prefs {}: {}", self.path.display(), e);
                LocalPrefs::default()
            }
        }
    }

    pub fn write(&self, prefs: &LocalPrefs) -> Result<(), String> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| format!("Failed to create {}: {}", parent.display(), e))?;
            }
        }
        let contents = serde_json::to_string(prefs).map_err(|e| e.to_string())?;
        std::fs::write(&self.path, contents)
            .map_err(|e| format!("Failed to write {}: {}", self.path.display(), e))
    }
}
