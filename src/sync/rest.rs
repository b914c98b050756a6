//! REST Adapter
//!
//! Talks to the serverless-style CRUD endpoints. Non-2xx statuses and
//! `success: false` envelopes are both failures; nothing is retried
//! here, retries are the user's.

use async_trait::async_trait;
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;

use museboard_backend::domain::{Collection, CollectionUpdate, NewCollection, UserProfile};

use super::{SyncAdapter, SyncError, SyncResult};

pub struct RestAdapter {
    base_url: String,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct ApiEnvelope<T> {
    success: bool,
    data: Option<T>,
    error: Option<String>,
}

impl RestAdapter {
    /// `base_url` up to and including the api prefix, e.g.
    /// `http://localhost:3000/api`
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Unwrap an endpoint response into its data payload
async fn into_data<T: DeserializeOwned>(response: reqwest::Response) -> SyncResult<Option<T>> {
    if !response.status().is_success() {
        return Err(SyncError::Http(format!(
            "status {}",
            response.status().as_u16()
        )));
    }
    let envelope: ApiEnvelope<T> = response.json().await?;
    if !envelope.success {
        return Err(SyncError::Backend(
            envelope.error.unwrap_or_else(|| "Request failed".to_string()),
        ));
    }
    Ok(envelope.data)
}

#[async_trait]
impl SyncAdapter for RestAdapter {
    async fn list(&self) -> SyncResult<Vec<Collection>> {
        let response = self.client.get(self.url("/collections")).send().await?;
        Ok(into_data::<Vec<Collection>>(response)
            .await?
            .unwrap_or_default())
    }

    async fn create(&self, draft: NewCollection) -> SyncResult<Collection> {
        let response = self
            .client
            .post(self.url("/collections"))
            .json(&json!({ "collection": draft }))
            .send()
            .await?;
        into_data::<Collection>(response)
            .await?
            .ok_or_else(|| SyncError::Backend("Create returned no collection".to_string()))
    }

    async fn update(&self, id: &str, updates: CollectionUpdate) -> SyncResult<()> {
        let response = self
            .client
            .put(self.url("/collections"))
            .json(&json!({ "id": id, "updates": updates }))
            .send()
            .await?;
        into_data::<serde_json::Value>(response).await?;
        Ok(())
    }

    async fn remove(&self, id: &str) -> SyncResult<()> {
        let encoded = utf8_percent_encode(id, NON_ALPHANUMERIC).to_string();
        let response = self
            .client
            .delete(format!("{}?id={}", self.url("/collections"), encoded))
            .send()
            .await?;
        into_data::<serde_json::Value>(response).await?;
        Ok(())
    }

    async fn get_profile(&self) -> SyncResult<Option<UserProfile>> {
        let response = self.client.get(self.url("/profile")).send().await?;
        into_data::<UserProfile>(response).await
    }

    async fn save_profile(&self, avatar: &str) -> SyncResult<()> {
        let response = self
            .client
            .post(self.url("/profile"))
            .json(&json!({ "avatar": avatar }))
            .send()
            .await?;
        into_data::<serde_json::Value>(response).await?;
        Ok(())
    }
}
