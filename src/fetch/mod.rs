//! Page fetching: download a URL, extract readable text, detect its language.

pub mod extractor;
pub mod language;

use std::time::Duration;

use extractor::extract_text;
use language::detect_language;
use reqwest::Client;
use tracing::debug;

/// Per-request timeout for page downloads.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("invalid URL: must be HTTP(S)")]
    InvalidScheme,

    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("fetch failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("fetch failed: status {0}")]
    Status(u16),

    #[error("parse_error: {0}")]
    Parse(String),
}

/// Cleaned content of one page or transcript. The transcript fetcher returns
/// the same shape (with an empty title) so the pipeline treats both uniformly.
#[derive(Debug, Clone, PartialEq)]
pub struct PageContent {
    pub title: String,
    pub text: String,
    pub language: Option<String>,
}

/// Abstraction for page fetching.
/// Implemented by `PageFetcher` for production; mock implementations used in tests.
pub trait FetchPage {
    async fn fetch(&self, url: &str) -> Result<PageContent, FetchError>;
}

#[derive(Debug, Clone)]
pub struct PageFetcher {
    http: Client,
}

impl PageFetcher {
    pub fn new(http: Client) -> Self {
        Self { http }
    }

    async fn download(&self, url: &str) -> Result<String, FetchError> {
        let parsed = url::Url::parse(url)?;
        match parsed.scheme() {
            "http" | "https" => {}
            _ => return Err(FetchError::InvalidScheme),
        }

        let response = self
            .http
            .get(url)
            .header("User-Agent", crate::USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        // Null bytes show up in malformed markup and break the HTML parser.
        Ok(body.replace('\0', ""))
    }
}

impl FetchPage for PageFetcher {
    async fn fetch(&self, url: &str) -> Result<PageContent, FetchError> {
        let html = self.download(url).await?;

        let page = extract_text(&html, Some(url)).map_err(FetchError::Parse)?;
        let language = detect_language(&page.text);

        debug!(url, bytes = html.len(), ?language, "page fetched");
        Ok(PageContent {
            title: page.title,
            text: page.text,
            language,
        })
    }
}
