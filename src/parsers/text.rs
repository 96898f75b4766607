use chrono::{DateTime, NaiveDate, Utc};
use std::time::SystemTime;

/// Collapses every run of whitespace into a single space and trims both ends
///
/// This is the normal form for all text pulled out of a page:
/// - Headings, paragraphs and attribute values may span lines
/// - Markup indentation should never leak into structured data
pub fn normalize_whitespace(segment: &str) -> String {
    segment.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Keeps at most `max_chars` characters (not bytes) of `text`
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Normal form for descriptions: collapse, truncate, then collapse again
/// so a cut never leaves a trailing space behind
pub fn clip_description(text: &str, max_chars: usize) -> String {
    let collapsed = normalize_whitespace(text);
    normalize_whitespace(truncate_chars(&collapsed, max_chars))
}

/// Reduces a `datetime` attribute value to its ISO calendar date
///
/// Values such as `2026-02-26` or `2026-02-26T10:00:00Z` yield `2026-02-26`.
/// Anything that does not start with a valid date is kept verbatim (trimmed).
pub fn calendar_date(raw: &str) -> String {
    let raw = raw.trim();
    raw.get(..10)
        .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
        .map(|date| date.to_string())
        .unwrap_or_else(|| raw.to_string())
}

/// UTC calendar date of a file timestamp
pub fn utc_date(time: SystemTime) -> NaiveDate {
    DateTime::<Utc>::from(time).date_naive()
}
