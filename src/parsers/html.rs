use crate::parsers::text::normalize_whitespace;
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;

static CANONICAL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"link[rel~="canonical"][href]"#).expect("valid selector"));
static H1: LazyLock<Selector> = LazyLock::new(|| Selector::parse("h1").expect("valid selector"));
static META_NAMED: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("meta[name][content]").expect("valid selector"));
static PARAGRAPH: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("p").expect("valid selector"));
static TIME: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("time[datetime]").expect("valid selector"));
static IMG: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("img[src]").expect("valid selector"));

/// Plain text of an element: markup dropped, whitespace collapsed
pub fn element_text(element: ElementRef<'_>) -> String {
    normalize_whitespace(&element.text().collect::<String>())
}

/// Returns `Some` only for non-blank values
fn non_blank(value: String) -> Option<String> {
    if value.is_empty() { None } else { Some(value) }
}

/// `href` of the first canonical link
pub fn canonical(doc: &Html) -> Option<String> {
    doc.select(&CANONICAL)
        .filter_map(|e| e.value().attr("href"))
        .map(|href| href.trim().to_string())
        .find(|href| !href.is_empty())
}

/// Text of the first top-level heading
pub fn headline(doc: &Html) -> Option<String> {
    doc.select(&H1).next().map(element_text).and_then(non_blank)
}

/// Content of `<meta name="description">`, name compared case-insensitively
pub fn meta_description(doc: &Html) -> Option<String> {
    doc.select(&META_NAMED)
        .find(|e| {
            e.value()
                .attr("name")
                .is_some_and(|name| name.trim().eq_ignore_ascii_case("description"))
        })
        .and_then(|e| e.value().attr("content"))
        .map(normalize_whitespace)
        .and_then(non_blank)
}

/// Text of the first paragraph
pub fn first_paragraph(doc: &Html) -> Option<String> {
    doc.select(&PARAGRAPH)
        .next()
        .map(element_text)
        .and_then(non_blank)
}

/// Raw `datetime` attribute of the first `<time>` that has one
pub fn time_datetime(doc: &Html) -> Option<String> {
    doc.select(&TIME)
        .filter_map(|e| e.value().attr("datetime"))
        .map(|dt| dt.trim().to_string())
        .find(|dt| !dt.is_empty())
}

/// `src` of the first image
pub fn first_image_src(doc: &Html) -> Option<String> {
    doc.select(&IMG)
        .filter_map(|e| e.value().attr("src"))
        .map(|src| src.trim().to_string())
        .find(|src| !src.is_empty())
}

/// Whether the document contains at least one element with the given tag name
pub fn has_element(doc: &Html, name: &str) -> bool {
    doc.root_element()
        .descendants()
        .filter_map(ElementRef::wrap)
        .any(|e| e.value().name().eq_ignore_ascii_case(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<!doctype html>
<html><head>
  <title>Guide</title>
  <link rel="canonical" href=" https://www.expenselypro.com/en/guide/ ">
  <meta name="Description" content="  Track   your
     expenses ">
</head><body>
  <h1>  Expense <em>tracking</em>
      guide </h1>
  <p class="last-updated"><time datetime="2026-02-26">Last updated: 2026-02-26</time></p>
  <p>First   paragraph.</p>
  <img src="/img/cover.png"><img src="/img/second.png">
</body></html>"#;

    #[test]
    fn test_extracts_fields() {
        let doc = Html::parse_document(PAGE);
        assert_eq!(
            canonical(&doc).as_deref(),
            Some("https://www.expenselypro.com/en/guide/")
        );
        assert_eq!(headline(&doc).as_deref(), Some("Expense tracking guide"));
        assert_eq!(
            meta_description(&doc).as_deref(),
            Some("Track your expenses")
        );
        assert_eq!(time_datetime(&doc).as_deref(), Some("2026-02-26"));
        assert_eq!(first_image_src(&doc).as_deref(), Some("/img/cover.png"));
        assert_eq!(
            first_paragraph(&doc).as_deref(),
            Some("Last updated: 2026-02-26")
        );
    }

    #[test]
    fn test_missing_fields() {
        let doc = Html::parse_document("<html><body><h1>  </h1><div>text</div></body></html>");
        assert_eq!(canonical(&doc), None);
        assert_eq!(headline(&doc), None);
        assert_eq!(meta_description(&doc), None);
        assert_eq!(first_paragraph(&doc), None);
        assert_eq!(time_datetime(&doc), None);
        assert_eq!(first_image_src(&doc), None);
    }

    #[test]
    fn test_empty_meta_description_is_absent() {
        let doc = Html::parse_document(r#"<meta name="description" content="   "><p>Body</p>"#);
        assert_eq!(meta_description(&doc), None);
    }

    #[test]
    fn test_has_element() {
        let doc = Html::parse_document("<body><header>Site</header><main></main></body>");
        assert!(has_element(&doc, "header"));
        assert!(!has_element(&doc, "footer"));
    }
}
