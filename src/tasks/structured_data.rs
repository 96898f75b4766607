use crate::config::SiteConfig;
use crate::error::Result;
use crate::jsonld;
use crate::pages::Page;
use crate::parsers::FieldExtractor;
use crate::patch;
use crate::tasks::{PageTask, Transform};
use scraper::Html;
use serde_json::Value;

/// Schema types this task owns; every other JSON-LD block is left alone
const OWNED_TYPES: &[&str] = &["Article", "FAQPage"];

/// Regenerates the Article and FAQPage JSON-LD blocks of article pages
pub struct StructuredData {
    config: SiteConfig,
}

impl StructuredData {
    pub fn new(config: SiteConfig) -> Self {
        Self { config }
    }
}

/// `datePublished` of the first removed Article block, if any
fn previous_publish_date(removed: &[Value]) -> Option<String> {
    removed
        .iter()
        .filter(|value| patch::has_schema_type(value, &["Article"]))
        .filter_map(|value| value.get("datePublished").and_then(Value::as_str))
        .map(str::trim)
        .find(|date| !date.is_empty())
        .map(str::to_string)
}

impl PageTask for StructuredData {
    fn label(&self) -> &'static str {
        "Structured data injected into"
    }

    fn apply(&self, page: &Page) -> Result<Transform> {
        let stripped = patch::strip_structured_data(&page.content, OWNED_TYPES);
        let doc = Html::parse_document(&stripped.html);

        let extractor = FieldExtractor::new(&self.config);
        let Some(mut fields) = extractor.extract(&doc, &page.rel_path, page.modified)? else {
            return Ok(Transform::Ineligible("no <h1>".to_string()));
        };

        // The first run sets the publish date; later runs carry it forward
        if let Some(published) = previous_publish_date(&stripped.removed) {
            fields.date_published = published;
        }

        let mut blocks = jsonld::to_script_tag(&jsonld::build_article(&fields, &self.config.schema))?;
        blocks.push('\n');
        if let Some(faq_page) = jsonld::build_faq_page(&fields.faq) {
            blocks.push_str(&jsonld::to_script_tag(&faq_page)?);
            blocks.push('\n');
        }

        ::log::debug!(
            "{}: headline {:?}, {} FAQ entries, replaced {} block(s)",
            page.rel_path.display(),
            fields.headline,
            fields.faq.len(),
            stripped.removed.len()
        );

        Ok(Transform::Rewritten(patch::inject_into_head(&stripped.html, &blocks)))
    }
}
