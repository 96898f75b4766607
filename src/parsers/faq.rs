use crate::parsers::FaqEntry;
use crate::parsers::html::element_text;
use scraper::{ElementRef, Html};

/// Finds question/answer pairs under FAQ-labelled `<h2>` sections
///
/// A section starts at an `<h2>` whose text contains one of `keywords`
/// (case-insensitive) and ends at the next `<h2>`, at the end of the
/// `<main>` it sits in, or at the end of the body. Inside it, each `<h3>`
/// directly followed by a `<p>` is one entry. Entries come back in document
/// order and at most `limit` are kept.
pub fn detect(doc: &Html, keywords: &[String], limit: usize) -> Vec<FaqEntry> {
    let keywords: Vec<String> = keywords
        .iter()
        .map(|k| k.to_lowercase())
        .filter(|k| !k.is_empty())
        .collect();

    let mut entries = Vec::new();
    if limit == 0 || keywords.is_empty() {
        return entries;
    }

    // Some(boundary) while inside an FAQ section; the boundary is the
    // enclosing <main>, if the heading has one
    let mut section = None;

    for element in doc.root_element().descendants().filter_map(ElementRef::wrap) {
        let name = element.value().name();

        if name == "h2" {
            section = is_faq_heading(element, &keywords).then(|| {
                element
                    .ancestors()
                    .find(|n| n.value().as_element().is_some_and(|e| e.name() == "main"))
                    .map(|n| n.id())
            });
            if section.is_some() {
                ::log::debug!("FAQ section found: {}", element_text(element));
            }
            continue;
        }

        let Some(boundary) = section else {
            continue;
        };

        if let Some(main_id) = boundary {
            if !element.ancestors().any(|n| n.id() == main_id) {
                section = None;
                continue;
            }
        }

        if name != "h3" {
            continue;
        }

        let Some(answer) = answer_after(element) else {
            continue;
        };

        let question = element_text(element);
        let answer = element_text(answer);
        if question.is_empty() || answer.is_empty() {
            continue;
        }

        entries.push(FaqEntry { question, answer });
        if entries.len() == limit {
            break;
        }
    }

    entries
}

fn is_faq_heading(heading: ElementRef<'_>, keywords: &[String]) -> bool {
    let text = element_text(heading).to_lowercase();
    keywords.iter().any(|k| text.contains(k.as_str()))
}

/// The `<p>` that follows a question heading, with only whitespace in between
fn answer_after(question: ElementRef<'_>) -> Option<ElementRef<'_>> {
    for node in question.next_siblings() {
        if let Some(element) = ElementRef::wrap(node) {
            return (element.value().name() == "p").then_some(element);
        }
        match node.value().as_text() {
            Some(text) if text.trim().is_empty() => continue,
            _ => return None,
        }
    }
    None
}
