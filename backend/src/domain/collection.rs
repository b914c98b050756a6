//! Collection Entity
//!
//! A user-curated, titled, ranked list of items rendered through one of
//! two fixed presentation templates. Wire names are camelCase to match
//! the persisted document layout.

use serde::{Deserialize, Serialize};

use super::item::Item;

/// Identifier carried by a draft that has never been published
pub const DRAFT_ID: &str = "draft";

/// Presentation template, fixed at creation in every observed flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Template {
    /// Uniform ranked card list
    #[default]
    Classic,
    /// Magazine-style hero layout
    Editorial,
}

impl Template {
    pub fn as_str(&self) -> &'static str {
        match self {
            Template::Classic => "classic",
            Template::Editorial => "editorial",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "editorial" => Template::Editorial,
            _ => Template::Classic,
        }
    }

    /// Built-in cover used when a collection has neither an explicit
    /// cover nor any item to borrow one from.
    pub fn default_cover(&self) -> &'static str {
        match self {
            Template::Classic => {
                "https://images.unsplash.com/photo-1495616811223-4d98c6e9c869?w=800&auto=format&fit=crop&q=60"
            }
            Template::Editorial => {
                "https://images.unsplash.com/photo-1558857563-b371033873b8?w=800&auto=format&fit=crop&q=60"
            }
        }
    }
}

/// A curated ranking collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Collection {
    /// Server-assigned document id, or [`DRAFT_ID`] for an unpersisted draft
    pub id: String,
    pub title: String,
    pub template: Template,
    /// Denormalized from `items.len()`
    pub item_count: u32,
    /// Epoch milliseconds, bumped on every publish
    pub last_edited: i64,
    /// Epoch milliseconds, set once at creation
    #[serde(default)]
    pub created_at: i64,
    pub cover_image: String,
    pub items: Vec<Item>,
    #[serde(default)]
    pub is_draft: bool,
}

impl Collection {
    /// Cover resolution order: explicit cover, first item's image,
    /// template built-in default.
    pub fn resolve_cover(
        explicit: Option<&str>,
        items: &[Item],
        template: Template,
    ) -> String {
        if let Some(cover) = explicit {
            if !cover.is_empty() {
                return cover.to_string();
            }
        }
        if let Some(first) = items.first() {
            return first.image.clone();
        }
        template.default_cover().to_string()
    }
}

/// Create payload: a collection without id or server timestamps
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCollection {
    pub title: String,
    pub template: Template,
    pub item_count: u32,
    pub cover_image: String,
    pub items: Vec<Item>,
    #[serde(default)]
    pub is_draft: bool,
}

/// Merge patch for an existing collection; `None` fields are untouched
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<Template>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<Item>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_draft: Option<bool>,
}

impl CollectionUpdate {
    /// Apply the patch onto `target`, leaving `None` fields alone.
    /// Timestamps are the store's concern, not the patch's.
    pub fn apply_to(&self, target: &mut Collection) {
        if let Some(title) = &self.title {
            target.title = title.clone();
        }
        if let Some(template) = self.template {
            target.template = template;
        }
        if let Some(count) = self.item_count {
            target.item_count = count;
        }
        if let Some(cover) = &self.cover_image {
            target.cover_image = cover.clone();
        }
        if let Some(items) = &self.items {
            target.items = items.clone();
        }
        if let Some(is_draft) = self.is_draft {
            target.is_draft = is_draft;
        }
    }
}
