//! Feed Search
//!
//! Case-insensitive filter over titles, item names, subtitles and tags.
//! Chinese text also matches its pinyin spelling, so a latin-keyboard
//! query like "dianying" finds 电影.

use museboard_backend::domain::Collection;
use pinyin::ToPinyin;

/// Collections matching `query`; an empty query matches everything
pub fn filter_collections<'a>(collections: &'a [Collection], query: &str) -> Vec<&'a Collection> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return collections.iter().collect();
    }
    collections
        .iter()
        .filter(|collection| matches_collection(collection, &query))
        .collect()
}

fn matches_collection(collection: &Collection, query: &str) -> bool {
    if text_matches(&collection.title, query) {
        return true;
    }
    collection.items.iter().any(|item| {
        text_matches(&item.name, query)
            || item
                .subtitle
                .as_deref()
                .map_or(false, |subtitle| text_matches(subtitle, query))
            || item
                .tags
                .as_ref()
                .map_or(false, |tags| tags.iter().any(|tag| text_matches(tag, query)))
    })
}

fn text_matches(text: &str, query: &str) -> bool {
    text.to_lowercase().contains(query) || pinyin_plain(text).contains(query)
}

/// Plain pinyin of the Chinese characters, other characters lowercased
fn pinyin_plain(text: &str) -> String {
    text.chars()
        .map(|c| match c.to_pinyin() {
            Some(p) => p.plain().to_string(),
            None => c.to_lowercase().to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use museboard_backend::domain::{Item, Template};

    fn collection(title: &str, items: Vec<Item>) -> Collection {
        Collection {
            id: title.to_string(),
            title: title.to_string(),
            template: Template::Classic,
            item_count: items.len() as u32,
            last_edited: 0,
            created_at: 0,
            cover_image: "cover".to_string(),
            items,
            is_draft: false,
        }
    }

    fn sample() -> Vec<Collection> {
        let mut cafe = Item::new("1", 1, "Metal Hands", "img");
        cafe.subtitle = Some("南昌路".to_string());
        cafe.tags = Some(vec!["咖啡".to_string(), "工业风".to_string()]);

        vec![
            collection("2024必看电影Top10", vec![Item::new("1", 1, "奥本海默", "img")]),
            collection("上海周末探店指南", vec![cafe]),
        ]
    }

    #[test]
    fn test_empty_query_matches_all() {
        let collections = sample();
        assert_eq!(filter_collections(&collections, "  ").len(), 2);
    }

    #[test]
    fn test_title_substring_match() {
        let collections = sample();
        let hits = filter_collections(&collections, "电影");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "2024必看电影Top10");
    }

    #[test]
    fn test_item_name_and_tag_match() {
        let collections = sample();
        assert_eq!(filter_collections(&collections, "奥本")[0].title, "2024必看电影Top10");
        assert_eq!(filter_collections(&collections, "咖啡").len(), 1);
        // Latin item names match case-insensitively
        assert_eq!(filter_collections(&collections, "metal").len(), 1);
    }

    #[test]
    fn test_pinyin_match_for_chinese_titles() {
        let collections = sample();
        let hits = filter_collections(&collections, "dianying");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "2024必看电影Top10");

        let hits = filter_collections(&collections, "zhoumo");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "上海周末探店指南");
    }

    #[test]
    fn test_no_match() {
        let collections = sample();
        assert!(filter_collections(&collections, "不存在的词").is_empty());
    }
}
