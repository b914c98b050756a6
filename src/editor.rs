//! Collection Editor
//!
//! Holds a draft collection through two phases, editing and previewing,
//! until publish commits it through the sync adapter. Item ranks are a
//! contiguous 1..N sequence after every mutation; reordering rewrites
//! the whole list and renumbers.

use museboard_backend::domain::{
    ranking, Collection, CollectionUpdate, Item, NewCollection, Template, DRAFT_ID,
};

use crate::constants::UNTITLED_TITLE;
use crate::sync::{SyncAdapter, SyncError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorPhase {
    Editing,
    Previewing,
    /// Terminal: the draft has been committed
    Published,
}

/// Mutable fields of one item, as the edit form collects them
#[derive(Debug, Clone, Default)]
pub struct ItemInput {
    pub name: String,
    pub subtitle: Option<String>,
    pub description: Option<String>,
    pub price: Option<String>,
    pub image: Option<String>,
    pub tags: Option<Vec<String>>,
}

#[derive(Debug)]
pub enum EditorError {
    /// Item needs a name before it can be saved
    NameRequired,
    /// Item needs an image before it can be saved
    ImageRequired,
    /// Publish needs a non-blank title
    TitleRequired,
    /// Publishing an empty collection needs explicit confirmation first
    EmptyNeedsConfirmation,
    /// The supplied ordering is not a permutation of the current items
    InvalidOrdering,
    UnknownItem(String),
    /// Operation not allowed in the current phase
    WrongPhase,
    Sync(SyncError),
}

impl std::fmt::Display for EditorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EditorError::NameRequired => write!(f, "Item name is required"),
            EditorError::ImageRequired => write!(f, "Item image is required"),
            EditorError::TitleRequired => write!(f, "Collection title is required"),
            EditorError::EmptyNeedsConfirmation => {
                write!(f, "Publishing an empty collection needs confirmation")
            }
            EditorError::InvalidOrdering => write!(f, "Ordering must cover every item exactly once"),
            EditorError::UnknownItem(id) => write!(f, "Unknown item {}", id),
            EditorError::WrongPhase => write!(f, "Operation not allowed in this phase"),
            EditorError::Sync(e) => write!(f, "Publish failed: {}", e),
        }
    }
}

impl std::error::Error for EditorError {}

impl From<SyncError> for EditorError {
    fn from(e: SyncError) -> Self {
        EditorError::Sync(e)
    }
}

/// What publish committed
#[derive(Debug)]
pub enum PublishOutcome {
    Created(Collection),
    Updated { id: String },
}

pub struct CollectionEditor {
    phase: EditorPhase,
    /// Set when the draft originated from a persisted collection
    origin_id: Option<String>,
    template: Template,
    title: String,
    cover_image: Option<String>,
    items: Vec<Item>,
}

impl CollectionEditor {
    /// Fresh draft with the chosen template
    pub fn new(template: Template) -> Self {
        Self {
            phase: EditorPhase::Editing,
            origin_id: None,
            template,
            title: String::new(),
            cover_image: None,
            items: Vec::new(),
        }
    }

    /// Edit an existing collection
    pub fn from_collection(collection: &Collection) -> Self {
        Self {
            phase: EditorPhase::Editing,
            origin_id: Some(collection.id.clone()),
            template: collection.template,
            title: collection.title.clone(),
            cover_image: Some(collection.cover_image.clone()),
            items: collection.items.clone(),
        }
    }

    pub fn phase(&self) -> EditorPhase {
        self.phase
    }

    pub fn template(&self) -> Template {
        self.template
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn set_cover_image(&mut self, cover: Option<String>) {
        self.cover_image = cover;
    }

    fn require_editing(&self) -> Result<(), EditorError> {
        if self.phase != EditorPhase::Editing {
            return Err(EditorError::WrongPhase);
        }
        Ok(())
    }

    fn validate_input(input: &ItemInput) -> Result<String, EditorError> {
        if input.name.trim().is_empty() {
            return Err(EditorError::NameRequired);
        }
        match &input.image {
            Some(image) if !image.is_empty() => Ok(image.clone()),
            _ => Err(EditorError::ImageRequired),
        }
    }

    /// Timestamp-derived id; consecutive adds can land on the same
    /// millisecond, so collide into a suffixed variant
    fn generate_item_id(&self) -> String {
        let millis = chrono::Utc::now().timestamp_millis();
        let mut candidate = millis.to_string();
        let mut bump = 1u32;
        while self.items.iter().any(|item| item.id == candidate) {
            candidate = format!("{}{}", millis, bump);
            bump += 1;
        }
        candidate
    }

    /// Append an item; rank = current count + 1, fresh timestamp id.
    /// Returns the assigned id.
    pub fn add_item(&mut self, input: ItemInput) -> Result<String, EditorError> {
        self.require_editing()?;
        let image = Self::validate_input(&input)?;

        let id = self.generate_item_id();
        self.items.push(Item {
            id: id.clone(),
            rank: self.items.len() as u32 + 1,
            name: input.name,
            subtitle: input.subtitle,
            description: input.description,
            price: input.price,
            image,
            tags: input.tags,
        });
        Ok(id)
    }

    /// Replace an item's mutable fields in place; its rank is untouched
    pub fn edit_item(&mut self, id: &str, input: ItemInput) -> Result<(), EditorError> {
        self.require_editing()?;
        let image = Self::validate_input(&input)?;

        let item = self
            .items
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or_else(|| EditorError::UnknownItem(id.to_string()))?;
        item.name = input.name;
        item.subtitle = input.subtitle;
        item.description = input.description;
        item.price = input.price;
        item.image = image;
        item.tags = input.tags;
        Ok(())
    }

    /// Remove an item and renumber the rest to 1..N. Unknown ids are a
    /// no-op, matching the filter semantics of the delete control.
    pub fn delete_item(&mut self, id: &str) -> Result<(), EditorError> {
        self.require_editing()?;
        self.items.retain(|item| item.id != id);
        ranking::renumber(&mut self.items);
        Ok(())
    }

    /// Apply a full new ordering (as item ids); every rank is reassigned
    /// to the item's 1-based position in it
    pub fn reorder(&mut self, ordered_ids: &[String]) -> Result<(), EditorError> {
        self.require_editing()?;
        if ordered_ids.len() != self.items.len() {
            return Err(EditorError::InvalidOrdering);
        }
        let distinct: std::collections::HashSet<&String> = ordered_ids.iter().collect();
        if distinct.len() != ordered_ids.len() {
            return Err(EditorError::InvalidOrdering);
        }

        let mut reordered = Vec::with_capacity(self.items.len());
        for id in ordered_ids {
            let position = self
                .items
                .iter()
                .position(|item| &item.id == id)
                .ok_or(EditorError::InvalidOrdering)?;
            reordered.push(self.items[position].clone());
        }

        ranking::renumber(&mut reordered);
        self.items = reordered;
        Ok(())
    }

    /// Cover resolution: explicit cover, first item's image, template default
    pub fn resolved_cover(&self) -> String {
        Collection::resolve_cover(self.cover_image.as_deref(), &self.items, self.template)
    }

    /// Materialize the draft for rendering through the real detail
    /// templates
    pub fn draft_collection(&self) -> Collection {
        let title = if self.title.trim().is_empty() {
            UNTITLED_TITLE.to_string()
        } else {
            self.title.clone()
        };
        let now = chrono::Utc::now().timestamp_millis();
        Collection {
            id: self
                .origin_id
                .clone()
                .unwrap_or_else(|| DRAFT_ID.to_string()),
            title,
            template: self.template,
            item_count: self.items.len() as u32,
            last_edited: now,
            created_at: now,
            cover_image: self.resolved_cover(),
            items: self.items.clone(),
            is_draft: true,
        }
    }

    /// editing → previewing
    pub fn preview(&mut self) -> Result<(), EditorError> {
        self.require_editing()?;
        self.phase = EditorPhase::Previewing;
        Ok(())
    }

    /// previewing → editing
    pub fn back_to_edit(&mut self) -> Result<(), EditorError> {
        if self.phase != EditorPhase::Previewing {
            return Err(EditorError::WrongPhase);
        }
        self.phase = EditorPhase::Editing;
        Ok(())
    }

    /// previewing → published: validates, then creates or updates
    /// depending on the draft's origin. `confirm_empty` is the one
    /// confirmation step required to publish a collection with no items.
    pub async fn publish(
        &mut self,
        adapter: &dyn SyncAdapter,
        confirm_empty: bool,
    ) -> Result<PublishOutcome, EditorError> {
        if self.phase != EditorPhase::Previewing {
            return Err(EditorError::WrongPhase);
        }
        if self.title.trim().is_empty() {
            return Err(EditorError::TitleRequired);
        }
        if self.items.is_empty() && !confirm_empty {
            return Err(EditorError::EmptyNeedsConfirmation);
        }

        let cover_image = self.resolved_cover();
        let outcome = match &self.origin_id {
            Some(id) => {
                let updates = CollectionUpdate {
                    title: Some(self.title.clone()),
                    template: Some(self.template),
                    item_count: Some(self.items.len() as u32),
                    cover_image: Some(cover_image),
                    items: Some(self.items.clone()),
                    is_draft: None,
                };
                adapter.update(id, updates).await?;
                PublishOutcome::Updated { id: id.clone() }
            }
            None => {
                let draft = NewCollection {
                    title: self.title.clone(),
                    template: self.template,
                    item_count: self.items.len() as u32,
                    cover_image,
                    items: self.items.clone(),
                    is_draft: false,
                };
                PublishOutcome::Created(adapter.create(draft).await?)
            }
        };

        self.phase = EditorPhase::Published;
        Ok(outcome)
    }
}
