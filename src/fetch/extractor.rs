use dom_smoothie::{Config, Readability};

pub(super) struct ExtractedPage {
    pub title: String,
    pub text: String,
}

/// Isolate the main article content and reduce it to plain text.
/// Returns the extraction failure message on unparseable markup.
pub(super) fn extract_text(html: &str, url: Option<&str>) -> Result<ExtractedPage, String> {
    let mut readability =
        Readability::new(html, url, Some(Config::default())).map_err(|e| e.to_string())?;

    let article = readability.parse().map_err(|e| e.to_string())?;

    let raw_text = article.text_content.to_string();
    Ok(ExtractedPage {
        title: article.title.to_string(),
        text: normalize_whitespace(&raw_text),
    })
}

/// Trim every line, drop empty ones, rejoin with newlines. Readability output
/// keeps the source document's indentation and blank runs otherwise.
pub(super) fn normalize_whitespace(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    const BLOG_HTML: &str = r#"
<!DOCTYPE html>
<html>
<head><title>Understanding Recursion</title></head>
<body>
<nav>Navigation links here</nav>
<article>
    <h1>Understanding Recursion</h1>
    <p>Recursion is a technique where a function calls itself to solve a
    smaller instance of the same problem. Every recursive function needs a
    base case that stops the chain of calls.</p>
    <p>A classic example is computing a factorial: the factorial of n is n
    times the factorial of n minus one, and the factorial of zero is one.
    The base case is what keeps the recursion finite.</p>
    <p>Recursive solutions often mirror the mathematical definition of a
    problem, which makes them easy to read once the pattern is familiar.
    They can be rewritten iteratively when stack depth is a concern.</p>
    <p>Learning to trace a few calls by hand is the fastest way to build an
    intuition for how the call stack grows and shrinks during execution.</p>
    <p>Once comfortable, try writing recursive traversals for trees and
    nested data structures, where recursion is the natural fit.</p>
</article>
<footer>Site footer</footer>
</body>
</html>"#;

    #[test]
    fn extracts_title_and_body_text() {
        let page = extract_text(BLOG_HTML, None).unwrap();

        assert_eq!(page.title, "Understanding Recursion");
        assert!(page.text.contains("base case"));
    }

    #[test]
    fn extracted_text_has_no_markup() {
        let page = extract_text(BLOG_HTML, None).unwrap();

        assert!(!page.text.contains('<'));
        assert!(!page.text.contains("Navigation links"));
    }

    #[test]
    fn normalize_trims_lines_and_drops_empties() {
        let input = "  first line  \n\n\n   second line\n   \n\tthird\n";
        assert_eq!(
            normalize_whitespace(input),
            "first line\nsecond line\nthird"
        );
    }

    #[test]
    fn normalize_empty_input() {
        assert_eq!(normalize_whitespace(""), "");
        assert_eq!(normalize_whitespace("\n \n  \n"), "");
    }
}
