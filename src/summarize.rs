//! Summarize-and-classify: one model round-trip per resource, with a fixed
//! stub whenever the backend is unavailable.

use serde_json::Value;
use tracing::debug;

use crate::llm::{GeminiClient, GenerateJson};
use crate::text::truncate_chars;

/// Pages are truncated before prompting; whole documents add cost without
/// improving a three-sentence summary.
const MAX_INPUT_CHARS: usize = 6000;

const FALLBACK_CONTENT_TYPE: &str = "concept_explanation";

#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub short_summary: String,
    pub estimated_level: String,
    pub content_type: String,
}

#[derive(Debug, Clone, Copy)]
pub struct SummarizeRequest<'a> {
    pub text: &'a str,
    pub topic: &'a str,
    pub target_language: &'a str,
    pub level_hint: &'a str,
}

/// Abstraction over the summarize step so the pipeline can run against test
/// doubles. Infallible: the production implementation degrades to a stub.
pub trait Summarize {
    async fn summarize(&self, req: SummarizeRequest<'_>) -> Summary;
}

/// Placeholder used when no model backend is available or it has failed.
pub(crate) fn stub_summary() -> Summary {
    Summary {
        short_summary: "TODO".to_string(),
        estimated_level: "beginner".to_string(),
        content_type: FALLBACK_CONTENT_TYPE.to_string(),
    }
}

pub async fn summarize_and_classify(llm: &impl GenerateJson, req: SummarizeRequest<'_>) -> Summary {
    let prompt = build_prompt(&req);

    match llm.generate_json(&prompt).await {
        Ok(value) => parse_summary(&value, req.level_hint),
        Err(e) => {
            debug!(error = %e, "summarization unavailable, using stub");
            stub_summary()
        }
    }
}

impl Summarize for GeminiClient {
    async fn summarize(&self, req: SummarizeRequest<'_>) -> Summary {
        summarize_and_classify(self, req).await
    }
}

/// Summarizer used when no model credentials are configured.
#[derive(Debug, Clone, Copy)]
pub struct StubSummarizer;

impl Summarize for StubSummarizer {
    async fn summarize(&self, _req: SummarizeRequest<'_>) -> Summary {
        stub_summary()
    }
}

fn build_prompt(req: &SummarizeRequest<'_>) -> String {
    let trimmed = truncate_chars(req.text, MAX_INPUT_CHARS);
    format!(
        r#"You are helping to build a learning assistant for non-English-medium students.

Given the TEXT below, do three things:
1. In at most 3 sentences, summarize the main idea in English, focusing on how it can help someone learn the topic: "{topic}".
2. Estimate the difficulty level as one of: ["school", "college", "beginner", "advanced"].
3. Classify the content type as one of: ["concept_explanation", "step_by_step_tutorial", "reference_docs", "example_collection"].

Respond ONLY as a JSON object with keys:
- "short_summary"
- "estimated_level"
- "content_type"

TEXT:
"""{trimmed}""""#,
        topic = req.topic,
    )
}

fn parse_summary(value: &Value, level_hint: &str) -> Summary {
    let short_summary = str_field(value, "short_summary");

    let estimated_level = {
        let level = str_field(value, "estimated_level");
        if level.is_empty() {
            level_hint.to_string()
        } else {
            level
        }
    };

    let content_type = {
        let kind = str_field(value, "content_type");
        if kind.is_empty() {
            FALLBACK_CONTENT_TYPE.to_string()
        } else {
            kind
        }
    };

    Summary {
        short_summary,
        estimated_level,
        content_type,
    }
}

fn str_field(value: &Value, key: &str) -> String {
    value
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .trim()
        .to_string()
}
