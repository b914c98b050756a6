//! HTTP CRUD Surface
//!
//! axum router exposing the collection and profile stores. Every
//! response body is the `{success, data?, error?}` envelope; CORS is
//! permissive on all endpoints and OPTIONS preflights answer 200 with
//! no body.

use std::sync::Arc;

use axum::http::{HeaderValue, StatusCode};
use axum::response::Response;
use axum::routing::get;
use axum::Router;

use crate::repository::{CollectionStore, ProfileStore};

mod collections;
mod envelope;
mod profile;

#[cfg(test)]
mod tests;

pub use envelope::Envelope;

/// Shared handler state
#[derive(Clone)]
pub struct ApiState {
    pub collections: Arc<dyn CollectionStore>,
    pub profiles: Arc<dyn ProfileStore>,
}

pub fn router(state: ApiState) -> Router {
    Router::new()
        .route(
            "/api/collections",
            get(collections::list)
                .post(collections::create)
                .put(collections::update)
                .delete(collections::remove)
                .options(preflight),
        )
        .route(
            "/api/profile",
            get(profile::get).post(profile::save).options(preflight),
        )
        .layer(axum::middleware::map_response(apply_cors))
        .with_state(state)
}

/// OPTIONS preflight: 200, empty body
async fn preflight() -> StatusCode {
    StatusCode::OK
}

/// Permissive CORS on every response
async fn apply_cors(mut response: Response) -> Response {
    let headers = response.headers_mut();
    headers.insert(
        "Access-Control-Allow-Credentials",
        HeaderValue::from_static("true"),
    );
    headers.insert("Access-Control-Allow-Origin", HeaderValue::from_static("*"));
    headers.insert(
        "Access-Control-Allow-Methods",
        HeaderValue::from_static("GET,POST,PUT,DELETE,OPTIONS"),
    );
    headers.insert(
        "Access-Control-Allow-Headers",
        HeaderValue::from_static("Content-Type"),
    );
    response
}
