//! User Profile
//!
//! The one user-settings record, addressed by a fixed key. Created
//! implicitly on first save, merged on update.

use serde::{Deserialize, Serialize};

/// Fixed key of the singleton profile document
pub const PROFILE_DOC_ID: &str = "default_user";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub avatar: String,
}

impl UserProfile {
    pub fn new(avatar: impl Into<String>) -> Self {
        Self {
            avatar: avatar.into(),
        }
    }
}
