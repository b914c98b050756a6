//! Profile Endpoints
//!
//! The singleton user-settings document. GET before any save answers
//! `data: null` rather than 404.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::envelope::{error_status, Envelope};
use super::ApiState;

#[derive(Debug, Deserialize)]
pub(super) struct SaveBody {
    pub(super) avatar: Option<String>,
}

/// GET /api/profile
pub(super) async fn get(State(state): State<ApiState>) -> (StatusCode, Json<Envelope>) {
    match state.profiles.get().await {
        Ok(Some(profile)) => (StatusCode::OK, Json(Envelope::ok(&profile))),
        Ok(None) => (StatusCode::OK, Json(Envelope::ok_null())),
        Err(e) => {
            log::error!("Failed to fetch profile: {}", e);
            (error_status(&e), Json(Envelope::err(e.to_string())))
        }
    }
}

/// POST /api/profile: merge-upsert
pub(super) async fn save(
    State(state): State<ApiState>,
    Json(body): Json<SaveBody>,
) -> (StatusCode, Json<Envelope>) {
    let Some(avatar) = body.avatar.filter(|a| !a.is_empty()) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(Envelope::err("Avatar is required")),
        );
    };

    match state.profiles.save(&avatar).await {
        Ok(profile) => (StatusCode::OK, Json(Envelope::ok(&profile))),
        Err(e) => {
            log::error!("Failed to save profile: {}", e);
            (error_status(&e), Json(Envelope::err(e.to_string())))
        }
    }
}
