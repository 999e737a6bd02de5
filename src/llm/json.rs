/// Model replies regularly arrive wrapped in a Markdown code fence even when
/// the prompt asks for bare JSON. Strip a leading triple-backtick marker with
/// an optional `json` tag, and anything after a trailing marker.
pub(crate) fn strip_code_fence(raw: &str) -> &str {
    let text = raw.trim();

    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    let rest = rest
        .strip_prefix("json")
        .or_else(|| rest.strip_prefix("JSON"))
        .unwrap_or(rest);

    match rest.find("```") {
        Some(end) => rest[..end].trim(),
        None => rest.trim(),
    }
}
