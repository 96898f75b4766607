//! Byte-precise edits of page text.
//!
//! Structural questions are answered on the parse tree; this module only
//! locates splice points in the original text, so everything outside the
//! edited span comes back unchanged.

use regex::{Captures, Regex};
use serde_json::Value;
use std::sync::LazyLock;

static LD_JSON_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?is)<script[^>]*type\s*=\s*["']application/ld\+json["'][^>]*>(.*?)</script\s*>(\r?\n)?"#,
    )
    .expect("valid regex")
});
static HEAD_CLOSE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)</head\s*>").expect("valid regex"));
static BODY_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<body\b[^>]*>").expect("valid regex"));
static BODY_CLOSE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)</body\s*>").expect("valid regex"));
static H1_CLOSE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)</h1\s*>").expect("valid regex"));
static OPAQUE_SPAN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<!--.*?-->|<script\b.*?</script\s*>|<style\b.*?</style\s*>")
        .expect("valid regex")
});

/// Result of removing structured-data blocks
#[derive(Debug)]
pub struct Stripped {
    /// Page text without the removed blocks
    pub html: String,
    /// Parsed contents of every removed block, in document order
    pub removed: Vec<Value>,
}

/// Removes JSON-LD blocks whose `@type` includes one of `types`
///
/// A block is removed only when it parses to a JSON object with a matching
/// `@type` (a string or an array of strings). Malformed JSON, top-level
/// arrays and other types stay byte-identical. A line break right after a
/// removed block goes with it, mirroring [`inject_into_head`].
pub fn strip_structured_data(html: &str, types: &[&str]) -> Stripped {
    let mut removed = Vec::new();

    let cleaned = LD_JSON_BLOCK.replace_all(html, |caps: &Captures<'_>| {
        let payload = caps.get(1).map_or("", |m| m.as_str()).trim();
        match serde_json::from_str::<Value>(payload) {
            Ok(value) if has_schema_type(&value, types) => {
                removed.push(value);
                String::new()
            }
            Ok(_) => caps[0].to_string(),
            Err(e) => {
                ::log::debug!("Keeping unparseable JSON-LD block: {}", e);
                caps[0].to_string()
            }
        }
    });

    Stripped {
        html: cleaned.into_owned(),
        removed,
    }
}

/// Whether a JSON-LD object declares one of `types`
pub fn has_schema_type(value: &Value, types: &[&str]) -> bool {
    let Some(object) = value.as_object() else {
        return false;
    };
    match object.get("@type") {
        Some(Value::String(kind)) => types.contains(&kind.as_str()),
        Some(Value::Array(kinds)) => kinds
            .iter()
            .filter_map(Value::as_str)
            .any(|kind| types.contains(&kind)),
        _ => false,
    }
}

/// Inserts `blocks` right before the first `</head>`, or at the very start
/// of the page when there is no head close
pub fn inject_into_head(html: &str, blocks: &str) -> String {
    match HEAD_CLOSE.find(html) {
        Some(m) => splice(html, m.start(), blocks),
        None => format!("{blocks}{html}"),
    }
}

/// Inserts `snippet` on its own line right after the first `</h1>`
///
/// Closing tags inside comments, scripts and styles are not headings.
pub fn insert_after_heading(html: &str, snippet: &str) -> Option<String> {
    let opaque: Vec<(usize, usize)> = OPAQUE_SPAN
        .find_iter(html)
        .map(|m| (m.start(), m.end()))
        .collect();
    let m = H1_CLOSE
        .find_iter(html)
        .find(|m| !opaque.iter().any(|&(from, to)| from <= m.start() && m.start() < to))?;
    Some(splice(html, m.end(), &format!("\n{snippet}")))
}

/// Inserts `snippet` right after the opening `<body ...>` tag
pub fn inject_after_body_open(html: &str, snippet: &str) -> Option<String> {
    let m = BODY_OPEN.find(html)?;
    Some(splice(html, m.end(), &format!("\n\n{snippet}\n")))
}

/// Inserts `snippet` right before `</body>`
pub fn inject_before_body_close(html: &str, snippet: &str) -> Option<String> {
    let m = BODY_CLOSE.find(html)?;
    Some(splice(html, m.start(), &format!("\n{snippet}\n\n")))
}

/// Replaces the first `start ... end` span (markers included) with `block`
///
/// Returns `None` when the page has no such span.
pub fn replace_marked_block(html: &str, start: &str, end: &str, block: &str) -> Option<String> {
    let from = html.find(start)?;
    let to = from + start.len() + html[from + start.len()..].find(end)? + end.len();

    let mut out = String::with_capacity(html.len() + block.len());
    out.push_str(&html[..from]);
    out.push_str(block.trim());
    out.push_str(&html[to..]);
    Some(out)
}

fn splice(html: &str, at: usize, insert: &str) -> String {
    let mut out = String::with_capacity(html.len() + insert.len());
    out.push_str(&html[..at]);
    out.push_str(insert);
    out.push_str(&html[at..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCHEMA_TYPES: &[&str] = &["Article", "FAQPage"];

    #[test]
    fn test_strips_only_article_and_faq() {
        let html = concat!(
            "<head>\n",
            "<script type=\"application/ld+json\">{\"@type\": \"Organization\", \"name\": \"X\"}</script>\n",
            "<script type=\"application/ld+json\">\n  {\"@type\": \"Article\", \"datePublished\": \"2024-05-01\"}\n</script>\n",
            "<script type='application/ld+json'>{\"@type\": [\"WebPage\", \"FAQPage\"]}</script>\n",
            "</head>"
        );
        let stripped = strip_structured_data(html, SCHEMA_TYPES);
        assert_eq!(
            stripped.html,
            "<head>\n<script type=\"application/ld+json\">{\"@type\": \"Organization\", \"name\": \"X\"}</script>\n</head>"
        );
        assert_eq!(stripped.removed.len(), 2);
        assert_eq!(stripped.removed[0]["datePublished"], "2024-05-01");
    }

    #[test]
    fn test_malformed_block_is_kept() {
        let html = "<head><script type=\"application/ld+json\">{\"@type\": \"Article\",</script></head>";
        let stripped = strip_structured_data(html, SCHEMA_TYPES);
        assert_eq!(stripped.html, html);
        assert!(stripped.removed.is_empty());
    }

    #[test]
    fn test_top_level_array_is_kept() {
        let html = "<script type=\"application/ld+json\">[{\"@type\": \"Article\"}]</script>";
        assert_eq!(strip_structured_data(html, SCHEMA_TYPES).html, html);
    }

    #[test]
    fn test_other_scripts_untouched() {
        let html = "<script>var a = {\"@type\": \"Article\"};</script>";
        assert_eq!(strip_structured_data(html, SCHEMA_TYPES).html, html);
    }

    #[test]
    fn test_inject_into_head() {
        assert_eq!(
            inject_into_head("<head><title>t</title></HEAD><body></body>", "<x>\n"),
            "<head><title>t</title><x>\n</HEAD><body></body>"
        );
        assert_eq!(inject_into_head("<p>no head</p>", "<x>\n"), "<x>\n<p>no head</p>");
    }

    #[test]
    fn test_insert_after_heading() {
        assert_eq!(
            insert_after_heading("<h1>T</h1><p>x</p>", "<p>new</p>").unwrap(),
            "<h1>T</h1>\n<p>new</p><p>x</p>"
        );
        assert!(insert_after_heading("<h2>T</h2>", "<p>new</p>").is_none());
    }

    #[test]
    fn test_heading_close_in_comment_or_script_is_skipped() {
        let html = "<!-- old </h1> --><script>var s = \"</h1>\";</script><h1>T</h1><p>x</p>";
        assert_eq!(
            insert_after_heading(html, "<p>new</p>").unwrap(),
            "<!-- old </h1> --><script>var s = \"</h1>\";</script><h1>T</h1>\n<p>new</p><p>x</p>"
        );
        assert!(insert_after_heading("<!-- </h1> -->", "<p>new</p>").is_none());
    }

    #[test]
    fn test_body_injection() {
        let html = "<html><body class=\"page\"><p>x</p></body></html>";
        assert_eq!(
            inject_after_body_open(html, "<header>H</header>\n").unwrap(),
            "<html><body class=\"page\">\n\n<header>H</header>\n\n<p>x</p></body></html>"
        );
        assert_eq!(
            inject_before_body_close(html, "<footer>F</footer>\n").unwrap(),
            "<html><body class=\"page\"><p>x</p>\n<footer>F</footer>\n\n\n</body></html>"
        );
        assert!(inject_after_body_open("<p>x</p>", "h").is_none());
        assert!(inject_before_body_close("<p>x</p>", "f").is_none());
    }

    #[test]
    fn test_body_open_does_not_match_longer_tags() {
        assert!(inject_after_body_open("<bodyguard></bodyguard>", "h").is_none());
    }

    #[test]
    fn test_replace_marked_block() {
        let html = "a<!-- S -->old<!-- E -->b<!-- S -->second<!-- E -->";
        assert_eq!(
            replace_marked_block(html, "<!-- S -->", "<!-- E -->", "  <!-- S -->new<!-- E -->\n").unwrap(),
            "a<!-- S -->new<!-- E -->b<!-- S -->second<!-- E -->"
        );
        assert!(replace_marked_block("a<!-- S -->open", "<!-- S -->", "<!-- E -->", "x").is_none());
    }
}
