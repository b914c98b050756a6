//! Repository Integration Tests
//!
//! Exercises the SQLite stores against an in-memory database.

use std::path::PathBuf;

use crate::domain::{
    CollectionUpdate, Item, NewCollection, Template,
};
use crate::repository::{
    init_db, CollectionStore, ProfileStore, SqliteCollectionStore, SqliteProfileStore,
};

fn setup_test_db() -> (SqliteCollectionStore, SqliteProfileStore) {
    let db_path = PathBuf::from(":memory:");
    let db_state = init_db(&db_path).expect("Failed to init test DB");
    (
        SqliteCollectionStore::new(db_state.connection()),
        SqliteProfileStore::new(db_state.connection()),
    )
}

fn sample_draft(title: &str) -> NewCollection {
    let items = vec![
        Item::new("1700000000001", 1, "RAC Bar", "data:image/jpeg;base64,aaa"),
        Item::new("1700000000002", 2, "Metal Hands", "data:image/jpeg;base64,bbb"),
    ];
    NewCollection {
        title: title.to_string(),
        template: Template::Editorial,
        item_count: items.len() as u32,
        cover_image: "data:image/jpeg;base64,cover".to_string(),
        items,
        is_draft: false,
    }
}

#[tokio::test]
async fn test_create_assigns_id_and_timestamps() {
    let (collections, _) = setup_test_db();

    let created = collections
        .create(sample_draft("上海周末探店指南"))
        .await
        .expect("Failed to create");

    assert!(!created.id.is_empty());
    assert_ne!(created.id, "draft");
    assert!(created.last_edited > 0);
    assert_eq!(created.created_at, created.last_edited);
}

#[tokio::test]
async fn test_created_collection_round_trips_through_list() {
    let (collections, _) = setup_test_db();

    let created = collections.create(sample_draft("必看电影")).await.unwrap();
    let listed = collections.list().await.expect("List failed");

    let found = listed
        .iter()
        .find(|c| c.id == created.id)
        .expect("created collection missing from list");
    assert_eq!(found.title, "必看电影");
    assert_eq!(found.template, Template::Editorial);
    assert_eq!(found.items, created.items);
}

#[tokio::test]
async fn test_list_is_ordered_by_last_edited_desc() {
    let (collections, _) = setup_test_db();

    let first = collections.create(sample_draft("older")).await.unwrap();
    let second = collections.create(sample_draft("newer")).await.unwrap();

    // Touch the first one so it becomes the most recent; the sleep keeps
    // the two timestamps from landing on the same millisecond
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    collections
        .update(
            &first.id,
            CollectionUpdate {
                title: Some("older, edited".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let listed = collections.list().await.unwrap();
    assert_eq!(listed[0].id, first.id);
    assert!(listed[0].last_edited >= listed[1].last_edited);
    assert_eq!(listed[1].id, second.id);
}

#[tokio::test]
async fn test_update_merges_and_bumps_timestamp() {
    let (collections, _) = setup_test_db();

    let created = collections.create(sample_draft("merge me")).await.unwrap();
    let updated = collections
        .update(
            &created.id,
            CollectionUpdate {
                cover_image: Some("data:image/jpeg;base64,new".into()),
                ..Default::default()
            },
        )
        .await
        .expect("Update failed");

    assert_eq!(updated.cover_image, "data:image/jpeg;base64,new");
    assert_eq!(updated.title, "merge me");
    assert_eq!(updated.items.len(), 2);
    assert!(updated.last_edited >= created.last_edited);
}

#[tokio::test]
async fn test_update_is_idempotent_apart_from_timestamp() {
    let (collections, _) = setup_test_db();

    let created = collections.create(sample_draft("twice")).await.unwrap();
    let patch = CollectionUpdate {
        title: Some("twice, edited".into()),
        item_count: Some(2),
        ..Default::default()
    };

    let once = collections.update(&created.id, patch.clone()).await.unwrap();
    let twice = collections.update(&created.id, patch).await.unwrap();

    assert_eq!(once.title, twice.title);
    assert_eq!(once.template, twice.template);
    assert_eq!(once.item_count, twice.item_count);
    assert_eq!(once.cover_image, twice.cover_image);
    assert_eq!(once.items, twice.items);
}

#[tokio::test]
async fn test_update_missing_collection_is_not_found() {
    let (collections, _) = setup_test_db();

    let result = collections
        .update("nope", CollectionUpdate::default())
        .await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_delete_removes_document() {
    let (collections, _) = setup_test_db();

    let created = collections.create(sample_draft("to delete")).await.unwrap();
    collections.delete(&created.id).await.expect("Delete failed");

    let found = collections.find_by_id(&created.id).await.unwrap();
    assert!(found.is_none());
}

#[tokio::test]
async fn test_writes_emit_change_events() {
    let (collections, _) = setup_test_db();
    let mut changes = collections.subscribe_changes();

    collections.create(sample_draft("watched")).await.unwrap();
    changes.recv().await.expect("missing change event");
}

#[tokio::test]
async fn test_profile_is_none_before_first_save() {
    let (_, profiles) = setup_test_db();
    assert!(profiles.get().await.unwrap().is_none());
}

#[tokio::test]
async fn test_profile_merge_upsert() {
    let (_, profiles) = setup_test_db();

    profiles.save("data:image/jpeg;base64,one").await.unwrap();
    profiles.save("data:image/jpeg;base64,two").await.unwrap();

    let profile = profiles.get().await.unwrap().expect("profile missing");
    assert_eq!(profile.avatar, "data:image/jpeg;base64,two");
}

#[tokio::test]
async fn test_disk_database_persists_across_reopen() {
    let dir = tempfile::tempdir().expect("tempdir");
    let db_path = dir.path().join("museboard.db");

    let id = {
        let db_state = init_db(&db_path).unwrap();
        let collections = SqliteCollectionStore::new(db_state.connection());
        collections.create(sample_draft("persisted")).await.unwrap().id
    };

    let db_state = init_db(&db_path).unwrap();
    let collections = SqliteCollectionStore::new(db_state.connection());
    let found = collections.find_by_id(&id).await.unwrap();
    assert_eq!(found.expect("missing after reopen").title, "persisted");
}
