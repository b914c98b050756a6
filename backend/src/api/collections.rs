//! Collection Endpoints

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use crate::domain::{CollectionUpdate, NewCollection};

use super::envelope::{error_status, Envelope};
use super::ApiState;

#[derive(Debug, Deserialize)]
pub(super) struct CreateBody {
    pub(super) collection: Option<NewCollection>,
}

#[derive(Debug, Deserialize)]
pub(super) struct UpdateBody {
    pub(super) id: Option<String>,
    pub(super) updates: Option<CollectionUpdate>,
}

#[derive(Debug, Deserialize)]
pub(super) struct DeleteParams {
    pub(super) id: Option<String>,
}

/// GET /api/collections: all collections, last-edited first
pub(super) async fn list(State(state): State<ApiState>) -> (StatusCode, Json<Envelope>) {
    match state.collections.list().await {
        Ok(collections) => (StatusCode::OK, Json(Envelope::ok(&collections))),
        Err(e) => {
            log::error!("Failed to list collections: {}", e);
            (error_status(&e), Json(Envelope::err(e.to_string())))
        }
    }
}

/// POST /api/collections: persist a draft, assign id and timestamp
pub(super) async fn create(
    State(state): State<ApiState>,
    Json(body): Json<CreateBody>,
) -> (StatusCode, Json<Envelope>) {
    let Some(draft) = body.collection else {
        return (
            StatusCode::BAD_REQUEST,
            Json(Envelope::err("Collection data is required")),
        );
    };

    match state.collections.create(draft).await {
        Ok(created) => (StatusCode::CREATED, Json(Envelope::ok(&created))),
        Err(e) => {
            log::error!("Failed to create collection: {}", e);
            (error_status(&e), Json(Envelope::err(e.to_string())))
        }
    }
}

/// PUT /api/collections: merge fields, bump last-edited
pub(super) async fn update(
    State(state): State<ApiState>,
    Json(body): Json<UpdateBody>,
) -> (StatusCode, Json<Envelope>) {
    let (Some(id), Some(updates)) = (body.id, body.updates) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(Envelope::err("ID and updates are required")),
        );
    };

    match state.collections.update(&id, updates).await {
        Ok(updated) => (StatusCode::OK, Json(Envelope::ok(&updated))),
        Err(e) => {
            log::error!("Failed to update collection {}: {}", id, e);
            (error_status(&e), Json(Envelope::err(e.to_string())))
        }
    }
}

/// DELETE /api/collections?id=: delete by document id
pub(super) async fn remove(
    State(state): State<ApiState>,
    Query(params): Query<DeleteParams>,
) -> (StatusCode, Json<Envelope>) {
    let Some(id) = params.id.filter(|id| !id.is_empty()) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(Envelope::err("Collection ID is required")),
        );
    };

    match state.collections.delete(&id).await {
        Ok(()) => (StatusCode::OK, Json(Envelope::ok_empty())),
        Err(e) => {
            log::error!("Failed to delete collection {}: {}", id, e);
            (error_status(&e), Json(Envelope::err(e.to_string())))
        }
    }
}
