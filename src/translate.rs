//! Translate-and-simplify: turn an English explanation into a simplified,
//! structured explanation in the target language.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::llm::GenerateJson;
use crate::text::truncate_chars;

const MAX_INPUT_CHARS: usize = 4000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimplifiedContent {
    pub explanation: String,
    pub analogy: Option<String>,
    pub step_by_step: Vec<String>,
    pub keywords: Vec<String>,
    pub language: String,
    pub level: String,
}

impl SimplifiedContent {
    fn empty(language: &str, level: &str) -> Self {
        Self {
            explanation: String::new(),
            analogy: None,
            step_by_step: Vec::new(),
            keywords: Vec::new(),
            language: language.to_string(),
            level: level.to_string(),
        }
    }
}

/// Translate and simplify an English explanation for a student at `level` in
/// `target_language`. Empty input short-circuits without touching the
/// backend; a backend failure degrades to an empty result.
pub async fn translate_and_simplify(
    llm: &impl GenerateJson,
    text: &str,
    target_language: &str,
    level: &str,
    topic: Option<&str>,
) -> SimplifiedContent {
    if text.is_empty() {
        return SimplifiedContent::empty(target_language, level);
    }

    let prompt = build_prompt(text, target_language, level, topic);

    let value = match llm.generate_json(&prompt).await {
        Ok(value) => value,
        Err(e) => {
            debug!(error = %e, "translation unavailable, returning empty result");
            return SimplifiedContent::empty(target_language, level);
        }
    };

    let explanation = str_field(&value, "explanation");
    let analogy = Some(str_field(&value, "analogy")).filter(|s| !s.is_empty());
    let step_by_step = string_list(value.get("step_by_step"), '\n');
    let keywords = string_list(value.get("keywords"), ',');
    let language = non_empty_or(&value, "language", target_language);
    let level = non_empty_or(&value, "level", level);

    SimplifiedContent {
        explanation,
        analogy,
        step_by_step,
        keywords,
        language,
        level,
    }
}

fn build_prompt(text: &str, target_language: &str, level: &str, topic: Option<&str>) -> String {
    let trimmed = truncate_chars(text, MAX_INPUT_CHARS);
    format!(
        r#"You are a teaching assistant helping students who learn in a non-English language.
Given the INPUT TEXT, translate and simplify it for a student at level "{level}".
If helpful, add a local analogy and break it into simple steps.
Respond ONLY as JSON with keys:
- "explanation": translated + simplified text in the target language
- "analogy": a short relatable analogy (may be empty)
- "step_by_step": array of 3-6 short bullet steps in the target language
- "keywords": array of important terms in the target language
- "language": the target language code
- "level": the target level string

TARGET LANGUAGE: {target_language}
TOPIC: {topic}
INPUT TEXT:
"""{trimmed}""""#,
        topic = topic.unwrap_or("N/A"),
    )
}

/// Backends asked for a JSON array occasionally hand back one delimited
/// string instead; both shapes normalize to a list of trimmed strings.
fn string_list(value: Option<&Value>, separator: char) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(String::from)
            .collect(),
        Some(Value::String(s)) => s
            .split(separator)
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(String::from)
            .collect(),
        _ => Vec::new(),
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

fn non_empty_or(value: &Value, key: &str, default: &str) -> String {
    let s = str_field(value, key);
    if s.is_empty() { default.to_string() } else { s }
}
