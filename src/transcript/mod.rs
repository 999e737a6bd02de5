//! Video transcripts: video-ID extraction and the timedtext transcript client.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::fetch::PageContent;

const API_BASE: &str = "https://www.youtube.com";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const DEFAULT_LANGUAGE: &str = "en";

#[derive(Debug, thiserror::Error)]
pub enum TranscriptError {
    #[error("could not parse video ID from URL")]
    InvalidUrl,

    #[error("transcript request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("no transcript available for video {video_id} (languages: {languages})")]
    NotAvailable { video_id: String, languages: String },
}

/// Abstraction for transcript retrieval.
/// Implemented by `TranscriptClient` for production; mock implementations used in tests.
pub trait FetchTranscript {
    async fn fetch(&self, url: &str, languages: &[String])
    -> Result<PageContent, TranscriptError>;
}

/// True when the URL's host is a YouTube domain, meaning the transcript
/// client should handle it even if the search result was not typed as video.
pub fn is_youtube_host(url: &str) -> bool {
    let Ok(parsed) = url::Url::parse(url) else {
        return false;
    };
    match parsed.host_str() {
        Some(host) => {
            let host = host.to_ascii_lowercase();
            host == "youtube.com" || host.ends_with(".youtube.com") || host == "youtu.be"
        }
        None => false,
    }
}

/// Extract a video ID from the three common URL shapes:
/// `?v=<id>`, `youtu.be/<id>`, and `/embed/<id>`.
pub fn extract_video_id(url: &str) -> Option<String> {
    let parsed = url::Url::parse(url).ok()?;

    // Standard watch?v=VIDEOID
    if let Some((_, id)) = parsed.query_pairs().find(|(key, _)| key == "v") {
        if !id.is_empty() {
            return Some(id.into_owned());
        }
    }

    let segments: Vec<&str> = parsed
        .path_segments()
        .map(|s| s.filter(|seg| !seg.is_empty()).collect())
        .unwrap_or_default();

    // Short links youtu.be/VIDEOID
    if let Some(host) = parsed.host_str() {
        if host.to_ascii_lowercase().ends_with("youtu.be") {
            if let Some(first) = segments.first() {
                return Some((*first).to_string());
            }
        }
    }

    // Embed format /embed/VIDEOID
    if let Some(pos) = segments.iter().position(|seg| *seg == "embed") {
        if let Some(id) = segments.get(pos + 1) {
            if is_video_id(id) {
                return Some((*id).to_string());
            }
        }
    }

    None
}

fn is_video_id(s: &str) -> bool {
    s.len() >= 6
        && s.chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// One timedtext track in json3 format.
#[derive(Debug, Deserialize)]
struct TranscriptTrack {
    #[serde(default)]
    events: Vec<TranscriptEvent>,
}

#[derive(Debug, Deserialize)]
struct TranscriptEvent {
    segs: Option<Vec<TranscriptSeg>>,
}

#[derive(Debug, Deserialize)]
struct TranscriptSeg {
    utf8: Option<String>,
}

fn join_events(track: &TranscriptTrack) -> String {
    let lines: Vec<String> = track
        .events
        .iter()
        .filter_map(|event| {
            let segs = event.segs.as_ref()?;
            let line: String = segs
                .iter()
                .filter_map(|seg| seg.utf8.as_deref())
                .collect::<Vec<_>>()
                .concat();
            let line = line.trim();
            if line.is_empty() {
                None
            } else {
                Some(line.to_string())
            }
        })
        .collect();

    lines.join("\n")
}

#[derive(Debug, Clone)]
pub struct TranscriptClient {
    http: Client,
    base_url: String,
}

impl TranscriptClient {
    pub fn new(http: Client) -> Self {
        Self {
            http,
            base_url: API_BASE.to_string(),
        }
    }

    #[cfg(test)]
    pub(crate) fn with_base_url(http: Client, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.to_string(),
        }
    }

    /// One timedtext request for one language. `None` means "no track in
    /// this language", which moves the caller on to the next preference.
    async fn fetch_track(
        &self,
        video_id: &str,
        lang: &str,
    ) -> Result<Option<String>, TranscriptError> {
        let response = self
            .http
            .get(format!("{}/api/timedtext", self.base_url))
            .query(&[("v", video_id), ("lang", lang), ("fmt", "json3")])
            .header("User-Agent", crate::USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?;

        if !response.status().is_success() {
            return Ok(None);
        }

        let body = response.text().await?;
        if body.trim().is_empty() {
            return Ok(None);
        }

        let Ok(track) = serde_json::from_str::<TranscriptTrack>(&body) else {
            return Ok(None);
        };

        let text = join_events(&track);
        if text.is_empty() { Ok(None) } else { Ok(Some(text)) }
    }
}

impl FetchTranscript for TranscriptClient {
    async fn fetch(
        &self,
        url: &str,
        languages: &[String],
    ) -> Result<PageContent, TranscriptError> {
        let video_id = extract_video_id(url).ok_or(TranscriptError::InvalidUrl)?;

        let languages: Vec<String> = if languages.is_empty() {
            vec![DEFAULT_LANGUAGE.to_string()]
        } else {
            languages.to_vec()
        };

        for lang in &languages {
            if let Some(text) = self.fetch_track(&video_id, lang).await? {
                debug!(%video_id, %lang, chars = text.len(), "transcript fetched");
                // Titles are not part of the transcript track.
                return Ok(PageContent {
                    title: String::new(),
                    text,
                    language: Some(lang.clone()),
                });
            }
        }

        Err(TranscriptError::NotAvailable {
            video_id,
            languages: languages.join(", "),
        })
    }
}
