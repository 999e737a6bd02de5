use std::env;
use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

const API_BASE: &str = "https://google.serper.dev";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("SERPER_API_KEY not set. Get one at https://serper.dev")]
    ApiKeyNotSet,

    #[error("query must not be empty")]
    EmptyQuery,

    #[error("search request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("search failed: status {0}")]
    Status(u16),
}

/// Abstraction for the web-search backend.
/// Implemented by `SerperClient` for production; mock implementations used in tests.
pub trait WebSearch {
    async fn search(&self, query: &str, num_results: u32)
    -> Result<SearchResponse, SearchError>;
}

/// Raw search reply. All fields are absent-tolerant: the provider omits
/// whole sections and individual fields freely.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub organic: Vec<SearchItem>,
    #[serde(default)]
    pub videos: Vec<SearchItem>,
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct SearchItem {
    pub title: Option<String>,
    pub link: Option<String>,
    pub source: Option<String>,
}

#[derive(Serialize)]
struct SearchRequest<'a> {
    q: &'a str,
    num: u32,
}

#[derive(Clone)]
struct ApiKey(String);

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("[REDACTED]")
    }
}

#[derive(Debug, Clone)]
pub struct SerperClient {
    http: Client,
    api_key: ApiKey,
    base_url: String,
}

impl SerperClient {
    pub fn from_env(http: Client) -> Result<Self, SearchError> {
        let api_key = env::var("SERPER_API_KEY").map_err(|_| SearchError::ApiKeyNotSet)?;
        if api_key.trim().is_empty() {
            return Err(SearchError::ApiKeyNotSet);
        }
        Ok(Self {
            http,
            api_key: ApiKey(api_key.trim().to_string()),
            base_url: API_BASE.to_string(),
        })
    }

    #[cfg(test)]
    pub(crate) fn with_base_url(http: Client, base_url: &str) -> Self {
        Self {
            http,
            api_key: ApiKey("test-key".to_string()),
            base_url: base_url.to_string(),
        }
    }
}

impl WebSearch for SerperClient {
    async fn search(
        &self,
        query: &str,
        num_results: u32,
    ) -> Result<SearchResponse, SearchError> {
        if query.is_empty() {
            return Err(SearchError::EmptyQuery);
        }

        let request = SearchRequest {
            q: query,
            num: num_results,
        };

        let response = self
            .http
            .post(format!("{}/search", self.base_url))
            .header("X-API-KEY", &self.api_key.0)
            .header("Content-Type", "application/json")
            .json(&request)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::Status(status.as_u16()));
        }

        let body: SearchResponse = response.json().await?;
        debug!(
            query,
            organic = body.organic.len(),
            videos = body.videos.len(),
            "search complete"
        );
        Ok(body)
    }
}
