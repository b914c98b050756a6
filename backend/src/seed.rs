//! Sample Data
//!
//! Writes a couple of ready-made collections through the store, one per
//! template, so a fresh install has something to browse.

use crate::domain::{DomainResult, Item, NewCollection, Template};
use crate::repository::CollectionStore;

fn seed_collections() -> Vec<NewCollection> {
    let movies = vec![
        Item {
            id: "1".to_string(),
            rank: 1,
            name: "奥本海默".to_string(),
            subtitle: Some("Oppenheimer".to_string()),
            description: Some(
                "克里斯托弗·诺兰导演的传记惊悚片，讲述奥本海默参与研制原子弹的故事。".to_string(),
            ),
            price: None,
            image: "https://images.unsplash.com/photo-1440404653325-ab127d49abc1?w=800&auto=format&fit=crop&q=60".to_string(),
            tags: None,
        },
        Item {
            id: "2".to_string(),
            rank: 2,
            name: "芭比".to_string(),
            subtitle: Some("Barbie".to_string()),
            description: Some("格蕾塔·葛韦格执导的奇幻喜剧片。".to_string()),
            price: None,
            image: "https://images.unsplash.com/photo-1596461404969-9ae70f2830c1?w=800&auto=format&fit=crop&q=60".to_string(),
            tags: None,
        },
    ];

    let shops = vec![
        Item {
            id: "1".to_string(),
            rank: 1,
            name: "RAC Bar".to_string(),
            subtitle: Some("安福路".to_string()),
            description: Some("法式休闲餐厅，可丽饼是招牌。".to_string()),
            price: Some("¥120/人".to_string()),
            image: "https://images.unsplash.com/photo-1554118811-1e0d58224f24?w=800&auto=format&fit=crop&q=60".to_string(),
            tags: Some(vec!["Brunch".to_string(), "法式".to_string()]),
        },
        Item {
            id: "2".to_string(),
            rank: 2,
            name: "Metal Hands".to_string(),
            subtitle: Some("南昌路".to_string()),
            description: Some("精品咖啡，铁手拿铁口感浓郁。".to_string()),
            price: Some("¥45/人".to_string()),
            image: "https://images.unsplash.com/photo-1497935586351-b67a49e012bf?w=800&auto=format&fit=crop&q=60".to_string(),
            tags: Some(vec!["咖啡".to_string(), "工业风".to_string()]),
        },
    ];

    vec![
        NewCollection {
            title: "2024必看电影Top10".to_string(),
            template: Template::Classic,
            item_count: movies.len() as u32,
            cover_image: "https://images.unsplash.com/photo-1536440136628-849c177e76a1?w=800&auto=format&fit=crop&q=60".to_string(),
            items: movies,
            is_draft: false,
        },
        NewCollection {
            title: "上海周末探店指南".to_string(),
            template: Template::Editorial,
            item_count: shops.len() as u32,
            cover_image: "https://images.unsplash.com/photo-1559339352-11d035aa65de?w=800&auto=format&fit=crop&q=60".to_string(),
            items: shops,
            is_draft: false,
        },
    ]
}

/// Insert the sample dataset; returns how many collections were written.
pub async fn seed_database(store: &dyn CollectionStore) -> DomainResult<usize> {
    let drafts = seed_collections();
    let count = drafts.len();
    for draft in drafts {
        let title = draft.title.clone();
        store.create(draft).await?;
        log::info!("Seeded collection: {}", title);
    }
    Ok(count)
}
