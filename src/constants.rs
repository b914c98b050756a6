//! Built-in Assets
//!
//! Fallback imagery and placeholder text. The per-template default
//! covers live on `Template` itself.

/// Avatar shown before the profile has ever been saved
pub const DEFAULT_AVATAR: &str =
    "https://images.unsplash.com/photo-1494790108377-be9c29b29330?w=200&auto=format&fit=crop&q=60";

/// Title shown for a draft that has not been named yet
pub const UNTITLED_TITLE: &str = "未命名榜单";
