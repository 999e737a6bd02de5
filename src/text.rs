/// Truncate to at most `max_chars` characters, never splitting a code point.
/// Inputs are user/web text, so byte slicing is not safe here.
pub(crate) fn truncate_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
