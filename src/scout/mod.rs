//! The content-scout pipeline: search, map, then optionally enrich each
//! resource with fetched text and a model-written summary.

pub mod types;

use tracing::{debug, warn};

use crate::fetch::{FetchPage, PageContent};
use crate::search::mapper::{BASE_SCORE, map_to_resources};
use crate::search::{SearchError, WebSearch};
use crate::summarize::{Summarize, SummarizeRequest};
use crate::transcript::{FetchTranscript, is_youtube_host};
use types::{Resource, ResourceType, ScoutRequest};

#[derive(Debug, thiserror::Error)]
pub enum ScoutError {
    #[error("{0}")]
    Search(#[from] SearchError),
}

/// Search query template shared by discovery and the URL-only listing.
pub fn build_query(topic: &str, level: &str) -> String {
    format!("{topic} tutorial for {level} students")
}

/// Run one discovery pass. Searches, maps the raw results, and, when
/// enrichment is on, walks the resources in discovery order fetching text
/// and summarizing. Fetch failures drop the resource; summarization never
/// fails (it degrades to a stub upstream). Only the search call can error.
pub async fn discover(
    search: &impl WebSearch,
    fetcher: &impl FetchPage,
    transcripts: &impl FetchTranscript,
    summarizer: &impl Summarize,
    req: &ScoutRequest,
) -> Result<Vec<Resource>, ScoutError> {
    let query = build_query(&req.topic, &req.level);
    let data = search.search(&query, req.num_results).await?;

    let mut resources = map_to_resources(&data, BASE_SCORE);
    if !req.include_videos {
        resources.retain(|r| r.kind != ResourceType::Video);
    }

    if !req.enrich {
        return Ok(resources);
    }

    let transcript_languages = [req.language.clone(), "en".to_string()];
    let mut enriched = Vec::with_capacity(resources.len());

    for mut resource in resources {
        let outcome = if resource.kind == ResourceType::Video || is_youtube_host(&resource.url) {
            transcripts
                .fetch(&resource.url, &transcript_languages)
                .await
                .map_err(|e| e.to_string())
        } else {
            fetcher.fetch(&resource.url).await.map_err(|e| e.to_string())
        };

        let page: PageContent = match outcome {
            Ok(page) if !page.text.is_empty() => page,
            Ok(_) => {
                debug!(url = %resource.url, "fetched page had no text, skipping");
                continue;
            }
            Err(reason) => {
                warn!(url = %resource.url, %reason, "fetch failed, skipping resource");
                continue;
            }
        };

        if resource.title.is_empty() {
            resource.title = page.title.clone();
        }
        resource.language = page.language.clone();
        resource.raw_text = Some(page.text.clone());

        // Only English content is summarized for now; anything else is kept
        // with its raw text untouched.
        if resource
            .language
            .as_deref()
            .is_some_and(|lang| !lang.starts_with("en"))
        {
            enriched.push(resource);
            continue;
        }

        let summary = summarizer
            .summarize(SummarizeRequest {
                text: &page.text,
                topic: &req.topic,
                target_language: &req.language,
                level_hint: &req.level,
            })
            .await;

        resource.short_summary = Some(summary.short_summary);
        resource.estimated_level = Some(summary.estimated_level);
        resource.content_type = Some(summary.content_type);

        enriched.push(resource);
    }

    Ok(enriched)
}

/// Terminal-friendly rendering of a resource list.
pub fn format_resources(resources: &[Resource]) -> String {
    let mut output = String::new();

    for resource in resources {
        output.push_str(&"=".repeat(80));
        output.push('\n');
        output.push_str(&format!("TITLE:   {}\n", resource.title));
        output.push_str(&format!("URL:     {}\n", resource.url));
        output.push_str(&format!("SOURCE:  {}  (score {:.2})\n", resource.source, resource.score));
        if let Some(language) = &resource.language {
            output.push_str(&format!("LANG:    {language}\n"));
        }
        if let Some(level) = &resource.estimated_level {
            output.push_str(&format!("LEVEL:   {level}\n"));
        }
        if let Some(kind) = &resource.content_type {
            output.push_str(&format!("TYPE:    {kind}\n"));
        }
        if let Some(summary) = &resource.short_summary {
            output.push_str(&format!("SUMMARY: {summary}\n"));
        }
        if let Some(text) = &resource.raw_text {
            let sample = crate::text::truncate_chars(text, 300);
            output.push_str(&format!("TEXT:    {sample}...\n"));
        }
    }

    output
}
