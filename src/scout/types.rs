use serde::{Deserialize, Serialize};

/// Kind of learning material a resource points at. Determines the fetch
/// strategy during enrichment (videos go through the transcript client).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceType {
    #[default]
    Article,
    Video,
    Docs,
    Other,
}

/// One discovered learning item. Serializes as a flat record, one per resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    pub title: String,
    pub url: String,
    #[serde(rename = "type")]
    pub kind: ResourceType,
    pub source: String,
    /// Detected language code, unset until the page has been fetched.
    pub language: Option<String>,
    pub estimated_level: Option<String>,
    pub short_summary: Option<String>,
    /// Relevance rank, descending with result position. Organic and video
    /// results carry independent score tracks.
    pub score: f64,
    /// Cleaned page text or transcript body, only set when a fetch succeeded
    /// with non-empty text.
    pub raw_text: Option<String>,
    pub content_type: Option<String>,
}

/// Parameters for one discovery run.
#[derive(Debug, Clone)]
pub struct ScoutRequest {
    pub topic: String,
    pub language: String,
    pub level: String,
    pub num_results: u32,
    pub enrich: bool,
    pub include_videos: bool,
}

impl Default for ScoutRequest {
    fn default() -> Self {
        Self {
            topic: String::new(),
            language: "en".to_string(),
            level: "beginner".to_string(),
            num_results: 8,
            enrich: false,
            include_videos: true,
        }
    }
}
