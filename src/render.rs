//! Presentation Renderer
//!
//! Pure functions from a collection to a layout value. The classic
//! template is a uniform ranked card list; the editorial template
//! splits ranks 1/2/3 into hero/secondary/tertiary treatments and
//! renders the rest as compact rows. Items are rank-sorted before any
//! slicing.

use museboard_backend::domain::{Collection, Item, Template};

#[derive(Debug)]
pub enum DetailLayout<'a> {
    Classic(ClassicLayout<'a>),
    Editorial(EditorialLayout<'a>),
}

/// Uniform ranked list
#[derive(Debug)]
pub struct ClassicLayout<'a> {
    pub cover_image: &'a str,
    pub title: &'a str,
    pub cards: Vec<&'a Item>,
}

/// Magazine-style hero layout
#[derive(Debug)]
pub struct EditorialLayout<'a> {
    /// Rank-1 item's image when present, collection cover otherwise
    pub hero_image: &'a str,
    pub title: &'a str,
    pub hero: Option<&'a Item>,
    pub secondary: Option<&'a Item>,
    pub tertiary: Option<&'a Item>,
    pub rest: Vec<&'a Item>,
}

fn rank_sorted(collection: &Collection) -> Vec<&Item> {
    let mut items: Vec<&Item> = collection.items.iter().collect();
    items.sort_by_key(|item| item.rank);
    items
}

pub fn layout(collection: &Collection) -> DetailLayout<'_> {
    match collection.template {
        Template::Classic => DetailLayout::Classic(ClassicLayout {
            cover_image: &collection.cover_image,
            title: &collection.title,
            cards: rank_sorted(collection),
        }),
        Template::Editorial => {
            let sorted = rank_sorted(collection);
            let hero = sorted.first().copied();
            DetailLayout::Editorial(EditorialLayout {
                hero_image: hero
                    .map(|item| item.image.as_str())
                    .unwrap_or(&collection.cover_image),
                title: &collection.title,
                hero,
                secondary: sorted.get(1).copied(),
                tertiary: sorted.get(2).copied(),
                rest: sorted.into_iter().skip(3).collect(),
            })
        }
    }
}

/// Display text for a last-edited timestamp
pub fn relative_edited(last_edited_ms: i64, now_ms: i64) -> String {
    let minutes = (now_ms - last_edited_ms).max(0) / 60_000;
    if minutes < 1 {
        "刚刚".to_string()
    } else if minutes < 60 {
        format!("{}分钟前", minutes)
    } else if minutes < 60 * 24 {
        format!("{}小时前", minutes / 60)
    } else if minutes < 60 * 24 * 30 {
        format!("{}天前", minutes / (60 * 24))
    } else {
        chrono::DateTime::from_timestamp_millis(last_edited_ms)
            .map(|dt| dt.format("%Y-%m-%d").to_string())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collection(template: Template, ranks: &[u32]) -> Collection {
        // Items inserted out of order on purpose
        let mut items: Vec<Item> = ranks
            .iter()
            .map(|&rank| Item::new(format!("id-{}", rank), rank, format!("N{}", rank), format!("img-{}", rank)))
            .collect();
        items.reverse();
        Collection {
            id: "c".to_string(),
            title: "测试榜单".to_string(),
            template,
            item_count: items.len() as u32,
            last_edited: 0,
            created_at: 0,
            cover_image: "cover".to_string(),
            items,
            is_draft: false,
        }
    }

    #[test]
    fn test_classic_cards_are_rank_ordered() {
        let c = collection(Template::Classic, &[1, 2, 3, 4]);
        let DetailLayout::Classic(layout) = layout(&c) else {
            panic!("expected classic layout");
        };
        let ranks: Vec<u32> = layout.cards.iter().map(|i| i.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3, 4]);
        assert_eq!(layout.cover_image, "cover");
    }

    #[test]
    fn test_editorial_slices_hero_secondary_tertiary_rest() {
        let c = collection(Template::Editorial, &[1, 2, 3, 4, 5]);
        let DetailLayout::Editorial(layout) = layout(&c) else {
            panic!("expected editorial layout");
        };
        assert_eq!(layout.hero.unwrap().rank, 1);
        assert_eq!(layout.secondary.unwrap().rank, 2);
        assert_eq!(layout.tertiary.unwrap().rank, 3);
        let rest: Vec<u32> = layout.rest.iter().map(|i| i.rank).collect();
        assert_eq!(rest, vec![4, 5]);
        assert_eq!(layout.hero_image, "img-1");
    }

    #[test]
    fn test_editorial_hero_image_falls_back_to_cover() {
        let c = collection(Template::Editorial, &[]);
        let DetailLayout::Editorial(layout) = layout(&c) else {
            panic!("expected editorial layout");
        };
        assert!(layout.hero.is_none());
        assert_eq!(layout.hero_image, "cover");
        assert!(layout.rest.is_empty());
    }

    #[test]
    fn test_relative_edited_buckets() {
        let now = 1_700_000_000_000i64;
        assert_eq!(relative_edited(now - 30_000, now), "刚刚");
        assert_eq!(relative_edited(now - 5 * 60_000, now), "5分钟前");
        assert_eq!(relative_edited(now - 3 * 3_600_000, now), "3小时前");
        assert_eq!(relative_edited(now - 2 * 86_400_000, now), "2天前");
        assert!(relative_edited(now - 90 * 86_400_000, now).starts_with("20"));
    }
}
