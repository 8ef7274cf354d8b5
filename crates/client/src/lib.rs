//! HTTP implementation of the Packed service traits.
//!
//! [`HttpPackingApi`] talks to the packing-list REST API and implements both
//! [`SuggestionSource`] and [`PackingListApi`]. The bearer token, when there
//! is one, is injected at construction and attached to every request.
//!
//! Endpoints (relative to the configured base URL):
//! - `GET    /items/conditional/{climate}/`
//! - `GET    /packing_lists/`
//! - `POST   /packing_lists/`
//! - `DELETE /packing_lists/{id}/`
//! - `GET    /packing_lists/{id}/items/`
//! - `POST   /packing_lists/{id}/items/`

use std::time::Duration;

use async_trait::async_trait;
use packed_core::{
    ApiError, AuthContext, Climate, CreatedList, ItemsPayload, NewPackingList, PackingListApi,
    PackingListSummary, SavedItem, SuggestionResponse, SuggestionSource,
};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Deserialize)]
struct ItemsEnvelope {
    #[serde(default)]
    items: Vec<SavedItem>,
}

#[derive(Deserialize)]
struct ListsEnvelope {
    #[serde(default)]
    packing_lists: Vec<PackingListSummary>,
}

#[derive(Deserialize)]
struct DeleteResponse {
    #[serde(default)]
    deleted: bool,
}

/// Client for the packing-list backend.
pub struct HttpPackingApi {
    base_url: String,
    auth: AuthContext,
    client: reqwest::Client,
}

impl HttpPackingApi {
    /// Create a client for `base_url` (e.g. `http://localhost:8005/api`).
    pub fn new(base_url: impl Into<String>, auth: AuthContext) -> Result<Self, ApiError> {
        Self::with_timeout(base_url, auth, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(
        base_url: impl Into<String>,
        auth: AuthContext,
        timeout: Duration,
    ) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Network(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            auth,
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let url = self.url(path);
        debug!(%method, %url, authenticated = self.auth.is_authenticated(), "Sending request");
        let builder = self
            .client
            .request(method, url)
            .header("Content-Type", "application/json");
        match self.auth.authorization_header() {
            Some(value) => builder.header("Authorization", value),
            None => builder,
        }
    }

    /// Send a request and map transport failures and non-success statuses.
    async fn send(&self, builder: reqwest::RequestBuilder) -> Result<reqwest::Response, ApiError> {
        let response = builder
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status().as_u16();

        if status == 401 || status == 403 {
            let body = response.text().await.unwrap_or_default();
            warn!(status, "Request was not authorized");
            return Err(ApiError::Unauthorized(if body.is_empty() {
                format!("status {status}")
            } else {
                body
            }));
        }

        if !response.status().is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status, body = %body, "API returned error");
            return Err(ApiError::Status {
                status_code: status,
                message: body,
            });
        }

        Ok(response)
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
        response
            .json()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }
}

#[async_trait]
impl SuggestionSource for HttpPackingApi {
    async fn fetch_suggestions(&self, climate: Climate) -> Result<SuggestionResponse, ApiError> {
        let path = format!("/items/conditional/{climate}/");
        let response = self.send(self.request(reqwest::Method::GET, &path)).await?;
        Self::decode(response).await
    }
}

#[async_trait]
impl PackingListApi for HttpPackingApi {
    async fn create_list(&self, payload: &NewPackingList) -> Result<CreatedList, ApiError> {
        let builder = self
            .request(reqwest::Method::POST, "/packing_lists/")
            .json(payload);
        let response = self.send(builder).await?;
        Self::decode(response).await
    }

    async fn attach_items(
        &self,
        list_id: i64,
        payload: &ItemsPayload,
    ) -> Result<Vec<SavedItem>, ApiError> {
        let path = format!("/packing_lists/{list_id}/items/");
        let builder = self.request(reqwest::Method::POST, &path).json(payload);
        let response = self.send(builder).await?;
        let envelope: ItemsEnvelope = Self::decode(response).await?;
        Ok(envelope.items)
    }

    async fn delete_list(&self, list_id: i64) -> Result<bool, ApiError> {
        let path = format!("/packing_lists/{list_id}/");
        let response = self.send(self.request(reqwest::Method::DELETE, &path)).await?;
        let body: DeleteResponse = Self::decode(response).await?;
        Ok(body.deleted)
    }

    async fn list_packing_lists(&self) -> Result<Vec<PackingListSummary>, ApiError> {
        let response = self
            .send(self.request(reqwest::Method::GET, "/packing_lists/"))
            .await?;
        let envelope: ListsEnvelope = Self::decode(response).await?;
        Ok(envelope.packing_lists)
    }

    async fn list_items(&self, list_id: i64) -> Result<Vec<SavedItem>, ApiError> {
        let path = format!("/packing_lists/{list_id}/items/");
        let response = self.send(self.request(reqwest::Method::GET, &path)).await?;
        let envelope: ItemsEnvelope = Self::decode(response).await?;
        Ok(envelope.items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_trimmed() {
        let api = HttpPackingApi::new("http://localhost:8005/api/", AuthContext::anonymous()).unwrap();
        assert_eq!(api.base_url(), "http://localhost:8005/api");
        assert_eq!(
            api.url("/packing_lists/"),
            "http://localhost:8005/api/packing_lists/"
        );
    }

    #[test]
    fn bearer_attached_when_present() {
        let api = HttpPackingApi::new("http://localhost:8005/api", AuthContext::bearer("tok")).unwrap();
        let request = api
            .request(reqwest::Method::GET, "/packing_lists/")
            .build()
            .unwrap();
        assert_eq!(request.headers()["Authorization"], "Bearer tok");
    }

    #[test]
    fn anonymous_request_has_no_authorization() {
        let api = HttpPackingApi::new("http://localhost:8005/api", AuthContext::anonymous()).unwrap();
        let request = api
            .request(reqwest::Method::GET, "/items/conditional/hot/")
            .build()
            .unwrap();
        assert!(request.headers().get("Authorization").is_none());
        assert_eq!(request.url().path(), "/api/items/conditional/hot/");
    }
}
