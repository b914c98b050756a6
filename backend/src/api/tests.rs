//! Endpoint Tests
//!
//! Drives the handlers directly against in-memory stores.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;

use crate::domain::{Collection, Item, NewCollection, Template, UserProfile};
use crate::repository::{CollectionStore, MemoryCollectionStore, MemoryProfileStore};

use super::collections::{self, CreateBody, DeleteParams, UpdateBody};
use super::profile::{self, SaveBody};
use super::{ApiState, Envelope};

fn test_state() -> ApiState {
    ApiState {
        collections: Arc::new(MemoryCollectionStore::new()),
        profiles: Arc::new(MemoryProfileStore::new()),
    }
}

fn sample_draft() -> NewCollection {
    NewCollection {
        title: "2024必看电影Top10".to_string(),
        template: Template::Classic,
        item_count: 1,
        cover_image: "data:image/jpeg;base64,cover".to_string(),
        items: vec![Item::new("1700000000000", 1, "奥本海默", "data:image/jpeg;base64,a")],
        is_draft: false,
    }
}

fn data_as<T: serde::de::DeserializeOwned>(envelope: &Envelope) -> T {
    serde_json::from_value(envelope.data.clone().expect("missing data"))
        .expect("unexpected data shape")
}

#[tokio::test]
async fn test_create_then_list_round_trip() {
    let state = test_state();

    let (status, Json(envelope)) = collections::create(
        State(state.clone()),
        Json(CreateBody {
            collection: Some(sample_draft()),
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(envelope.success);
    let created: Collection = data_as(&envelope);
    assert_ne!(created.id, "draft");

    let (status, Json(envelope)) = collections::list(State(state)).await;
    assert_eq!(status, StatusCode::OK);
    let listed: Vec<Collection> = data_as(&envelope);
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].title, created.title);
    assert_eq!(listed[0].template, created.template);
    assert_eq!(listed[0].items, created.items);
}

#[tokio::test]
async fn test_create_without_collection_is_bad_request() {
    let (status, Json(envelope)) =
        collections::create(State(test_state()), Json(CreateBody { collection: None })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(!envelope.success);
    assert_eq!(envelope.error.as_deref(), Some("Collection data is required"));
}

#[tokio::test]
async fn test_update_requires_id_and_updates() {
    let (status, Json(envelope)) = collections::update(
        State(test_state()),
        Json(UpdateBody {
            id: Some("x".into()),
            updates: None,
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(envelope.error.as_deref(), Some("ID and updates are required"));
}

#[tokio::test]
async fn test_update_missing_collection_is_not_found() {
    let (status, Json(envelope)) = collections::update(
        State(test_state()),
        Json(UpdateBody {
            id: Some("missing".into()),
            updates: Some(Default::default()),
        }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(!envelope.success);
}

#[tokio::test]
async fn test_delete_requires_id() {
    let (status, Json(envelope)) =
        collections::remove(State(test_state()), Query(DeleteParams { id: None })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(envelope.error.as_deref(), Some("Collection ID is required"));
}

#[tokio::test]
async fn test_delete_removes_from_list() {
    let state = test_state();
    let created = state
        .collections
        .create(sample_draft())
        .await
        .expect("create failed");

    let (status, Json(envelope)) = collections::remove(
        State(state.clone()),
        Query(DeleteParams {
            id: Some(created.id),
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(envelope.success);

    let (_, Json(envelope)) = collections::list(State(state)).await;
    let listed: Vec<Collection> = data_as(&envelope);
    assert!(listed.is_empty());
}

#[tokio::test]
async fn test_profile_get_is_null_before_first_save() {
    let (status, Json(envelope)) = profile::get(State(test_state())).await;
    assert_eq!(status, StatusCode::OK);
    assert!(envelope.success);
    assert_eq!(envelope.data, Some(serde_json::Value::Null));
}

#[tokio::test]
async fn test_profile_save_then_get() {
    let state = test_state();

    let (status, Json(envelope)) = profile::save(
        State(state.clone()),
        Json(SaveBody {
            avatar: Some("data:image/jpeg;base64,me".into()),
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(envelope.success);

    let (_, Json(envelope)) = profile::get(State(state)).await;
    let profile: UserProfile = data_as(&envelope);
    assert_eq!(profile.avatar, "data:image/jpeg;base64,me");
}

#[tokio::test]
async fn test_profile_save_requires_avatar() {
    let (status, Json(envelope)) =
        profile::save(State(test_state()), Json(SaveBody { avatar: None })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(envelope.error.as_deref(), Some("Avatar is required"));
}
