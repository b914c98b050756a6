//! End-to-end flow over the embedded backend: author a collection in
//! the editor, publish it, watch it arrive in the app store, browse it
//! through search and the detail layouts, edit it, and delete it.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;

use museboard::domain::{ranking, Template};
use museboard::editor::{CollectionEditor, ItemInput, PublishOutcome};
use museboard::prefs::PrefsFile;
use museboard::render::{layout, DetailLayout};
use museboard::search::filter_collections;
use museboard::store::{attach_polling, AppStore, Tab, ViewState};
use museboard::sync::{watch_collections, EmbeddedAdapter, SyncAdapter};

fn item(name: &str, subtitle: Option<&str>) -> ItemInput {
    ItemInput {
        name: name.to_string(),
        subtitle: subtitle.map(str::to_string),
        image: Some(format!("data:image/jpeg;base64,{}", name.len())),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_author_browse_edit_delete_flow() {
    let adapter = Arc::new(EmbeddedAdapter::in_memory());

    // --- author a four-item editorial collection
    let mut editor = CollectionEditor::new(Template::Editorial);
    editor.set_title("上海周末探店指南");
    let first = editor.add_item(item("RAC Bar", Some("安福路"))).unwrap();
    editor.add_item(item("Metal Hands", Some("南昌路"))).unwrap();
    editor.add_item(item("into_the_force", None)).unwrap();
    editor.add_item(item("O.P.S Cafe", None)).unwrap();

    // Put the last-added shop on top
    let mut order: Vec<String> = editor.items().iter().map(|i| i.id.clone()).collect();
    order.rotate_right(1);
    editor.reorder(&order).unwrap();
    assert!(ranking::is_contiguous(editor.items()));

    editor.preview().unwrap();
    let PublishOutcome::Created(created) = editor.publish(adapter.as_ref(), false).await.unwrap()
    else {
        panic!("expected creation");
    };

    // --- the push subscription feeds the app store
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(Mutex::new(AppStore::new(
        adapter.clone(),
        PrefsFile::new(dir.path().join("prefs.json")),
    )));
    let store_cb = store.clone();
    let subscription = watch_collections(
        adapter.clone(),
        Arc::new(move |snapshot| {
            let store = store_cb.clone();
            tokio::spawn(async move {
                store.lock().await.apply_snapshot(snapshot);
            });
        }),
    );
    tokio::time::sleep(Duration::from_millis(50)).await;

    {
        let mut store = store.lock().await;
        assert_eq!(store.collections().len(), 1);

        // search finds it by pinyin, then the detail view renders it
        let hits = filter_collections(store.collections(), "tandian");
        assert_eq!(hits.len(), 1);

        store.open_collection(created.id.clone(), 140.0);
        assert_eq!(store.view(), ViewState::Detail);
        let selected = store.selected_collection().expect("selected");
        let DetailLayout::Editorial(detail) = layout(selected) else {
            panic!("expected editorial layout");
        };
        assert_eq!(detail.hero.unwrap().name, "O.P.S Cafe");
        assert_eq!(detail.rest.len(), 1);

        store.back_from_detail();
        assert_eq!(store.scroll_offset(Tab::Home), 140.0);
    }

    // --- edit the published collection: drop the old rank-1 item
    let mut editor = CollectionEditor::from_collection(&created);
    editor.delete_item(&first).unwrap();
    editor.preview().unwrap();
    editor.publish(adapter.as_ref(), false).await.unwrap();

    tokio::time::sleep(Duration::from_millis(50)).await;
    {
        let store = store.lock().await;
        let updated = &store.collections()[0];
        assert_eq!(updated.item_count, 3);
        assert!(ranking::is_contiguous(&updated.items));
        assert!(updated.items.iter().all(|i| i.id != first));
    }

    // --- delete it through the store
    {
        let mut store = store.lock().await;
        store.open_collection(created.id.clone(), 0.0);
        store.delete_collection(&created.id).await.unwrap();
        assert_eq!(store.view(), ViewState::Home);
    }
    assert!(adapter.list().await.unwrap().is_empty());

    subscription.cancel();
}

#[tokio::test]
async fn test_polling_store_round_trip_preserves_content() {
    let adapter = Arc::new(EmbeddedAdapter::in_memory());

    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(Mutex::new(AppStore::new(
        adapter.clone(),
        PrefsFile::new(dir.path().join("prefs.json")),
    )));
    let subscription = attach_polling(store.clone(), adapter.clone(), Duration::from_millis(10));

    let mut editor = CollectionEditor::new(Template::Classic);
    editor.set_title("2024必看电影Top10");
    editor.add_item(item("奥本海默", Some("Oppenheimer"))).unwrap();
    editor.preview().unwrap();
    let PublishOutcome::Created(created) = editor.publish(adapter.as_ref(), false).await.unwrap()
    else {
        panic!("expected creation");
    };

    tokio::time::sleep(Duration::from_millis(60)).await;

    let store = store.lock().await;
    let listed = store.collections();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].title, created.title);
    assert_eq!(listed[0].template, created.template);
    assert_eq!(listed[0].items, created.items);

    subscription.cancel();
}
