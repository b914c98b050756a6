//! Item Entity
//!
//! A single ranked entry inside a collection: one image, a name, and
//! optional metadata. Ranks are 1-based and kept contiguous by the
//! owning collection (see `ranking`).

use serde::{Deserialize, Serialize};

/// A ranked entry within a collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Opaque identifier, client-generated from a millisecond timestamp
    pub id: String,
    /// 1-based position, unique and contiguous within the collection
    pub rank: u32,
    pub name: String,
    /// Brand or secondary name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    /// Data URI or image URL
    pub image: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

impl Item {
    pub fn new(
        id: impl Into<String>,
        rank: u32,
        name: impl Into<String>,
        image: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            rank,
            name: name.into(),
            subtitle: None,
            description: None,
            price: None,
            image: image.into(),
            tags: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_creation() {
        let item = Item::new("1700000000000", 1, "奥本海默", "data:image/jpeg;base64,xxx");
        assert_eq!(item.rank, 1);
        assert_eq!(item.name, "奥本海默");
        assert!(item.subtitle.is_none());
    }

    #[test]
    fn test_optional_fields_omitted_on_wire() {
        let item = Item::new("1", 1, "X", "img");
        let json = serde_json::to_string(&item).unwrap();
        assert!(!json.contains("subtitle"));
        assert!(!json.contains("tags"));
    }
}
