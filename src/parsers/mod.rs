pub mod faq;
pub mod html;
pub mod text;


use crate::config::SiteConfig;
use crate::error::Result;
use chrono::NaiveDate;
use scraper::Html;
use std::path::{Component, Path};
use url::Url;

/// A question and its answer, both as plain text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaqEntry {
    pub question: String,
    pub answer: String,
}

/// Everything the structured-data generator needs to know about a page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageFields {
    /// Explicit canonical link, or the URL derived from the page's path
    pub canonical: String,
    /// Text of the first `<h1>`
    pub headline: String,
    /// Meta description, or the first paragraph when there is none
    pub description: String,
    pub date_published: String,
    pub date_modified: String,
    /// First image as an absolute URL
    pub image: Option<String>,
    pub faq: Vec<FaqEntry>,
}

/// Pulls [`PageFields`] out of a parsed page
pub struct FieldExtractor<'a> {
    config: &'a SiteConfig,
}

impl<'a> FieldExtractor<'a> {
    pub fn new(config: &'a SiteConfig) -> Self {
        Self { config }
    }

    /// Extract the fields of an article page
    ///
    /// Returns `Ok(None)` when the page has no top-level heading: such pages
    /// are not articles. `rel_path` is the page's path relative to the site
    /// root and `file_modified` its modification date, used when the page
    /// carries no `<time datetime>` of its own.
    pub fn extract(
        &self,
        doc: &Html,
        rel_path: &Path,
        file_modified: NaiveDate,
    ) -> Result<Option<PageFields>> {
        let Some(headline) = html::headline(doc) else {
            return Ok(None);
        };

        let canonical = match html::canonical(doc) {
            Some(explicit) => explicit,
            None => canonical_for_path(&self.config.domain_url()?, rel_path)?,
        };

        let max_chars = self.config.schema.max_description_chars;
        let description = html::meta_description(doc)
            .or_else(|| html::first_paragraph(doc))
            .map(|d| text::clip_description(&d, max_chars))
            .unwrap_or_default();

        let date_modified = match html::time_datetime(doc) {
            Some(raw) => text::calendar_date(&raw),
            None => file_modified.to_string(),
        };

        let image = html::first_image_src(doc).and_then(|src| self.resolve_image(&src, &canonical));

        let faq = faq::detect(
            doc,
            &self.config.schema.faq_keywords,
            self.config.schema.max_faq_entries,
        );

        Ok(Some(PageFields {
            canonical,
            headline,
            description,
            date_published: date_modified.clone(),
            date_modified,
            image,
            faq,
        }))
    }

    /// Make an image reference absolute, relative to the page's canonical URL
    ///
    /// A reference that cannot be resolved leaves the page without an image.
    fn resolve_image(&self, src: &str, canonical: &str) -> Option<String> {
        if is_absolute_http(src) {
            return Some(src.to_string());
        }
        let resolved = match Url::parse(canonical) {
            Ok(url) if !url.cannot_be_a_base() => Ok(url),
            _ => self.config.content_base_url(),
        }
        .and_then(|base| Ok(base.join(src)?));

        match resolved {
            Ok(url) => Some(url.to_string()),
            Err(e) => {
                ::log::debug!("Ignoring unresolvable image {:?}: {}", src, e);
                None
            }
        }
    }
}

fn is_absolute_http(src: &str) -> bool {
    let lower = src.get(..8).unwrap_or(src).to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Canonical URL of a page that does not declare one
///
/// `rel_path` is relative to the site root; `index.html` maps to its
/// directory, so `en/guide/index.html` becomes `<domain>/en/guide/`.
pub fn canonical_for_path(domain: &Url, rel_path: &Path) -> Result<String> {
    let segments: Vec<String> = rel_path
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();

    let mut path = format!("/{}", segments.join("/"));
    if path.ends_with("/index.html") {
        path.truncate(path.len() - "index.html".len());
    }

    Ok(domain.join(&path)?.to_string())
}
