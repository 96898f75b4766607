use crate::config::{PartialsConfig, SiteConfig};
use crate::error::{Error, Result};
use crate::filter::slash_path;
use crate::pages::Page;
use crate::parsers::html;
use crate::patch;
use crate::tasks::{PageTask, Transform};
use scraper::Html;
use std::fs;
use std::path::{Path, PathBuf};

/// Injects the shared header and footer partials into every page
///
/// Marked blocks from an earlier run are replaced in place. Otherwise the
/// partial is injected, but only if the page has no `<header>` (or
/// `<footer>`) of its own.
pub struct HeaderFooter {
    header: String,
    footer: String,
    markers: PartialsConfig,
    /// Partials directory relative to the site root, as a `/` path
    partials_prefix: String,
}

impl HeaderFooter {
    /// Create the task from partial contents already in memory
    pub fn new(header: &str, footer: &str, markers: PartialsConfig, partials_prefix: &str) -> Self {
        Self {
            header: normalize_partial(header),
            footer: normalize_partial(footer),
            markers,
            partials_prefix: partials_prefix.trim_end_matches('/').to_string(),
        }
    }

    /// Load both partials from the configured partials directory
    ///
    /// A missing partial is fatal: nothing sensible can be injected without it.
    pub fn load(config: &SiteConfig) -> Result<Self> {
        let dir = config.partials_root();
        let header = read_partial(&dir.join(&config.partials.header_file))?;
        let footer = read_partial(&dir.join(&config.partials.footer_file))?;

        let prefix = slash_path(dir.strip_prefix(&config.site_root).unwrap_or(&dir));
        Ok(Self::new(&header, &footer, config.partials.clone(), &prefix))
    }
}

fn read_partial(path: &Path) -> Result<String> {
    if !path.is_file() {
        return Err(Error::MissingPartial(PathBuf::from(path)));
    }
    fs::read_to_string(path).map_err(|e| Error::io(path, e))
}

fn normalize_partial(partial: &str) -> String {
    format!("{}\n", partial.trim())
}

impl PageTask for HeaderFooter {
    fn label(&self) -> &'static str {
        "Header/footer applied to"
    }

    fn accepts(&self, rel_path: &Path) -> bool {
        let path = slash_path(rel_path);
        !(path == self.partials_prefix || path.starts_with(&format!("{}/", self.partials_prefix)))
    }

    fn apply(&self, page: &Page) -> Result<Transform> {
        let mut html = page.content.clone();

        let header_replaced = match patch::replace_marked_block(
            &html,
            &self.markers.header_start,
            &self.markers.header_end,
            &self.header,
        ) {
            Some(updated) => {
                html = updated;
                true
            }
            None => false,
        };
        let footer_replaced = match patch::replace_marked_block(
            &html,
            &self.markers.footer_start,
            &self.markers.footer_end,
            &self.footer,
        ) {
            Some(updated) => {
                html = updated;
                true
            }
            None => false,
        };

        if !header_replaced && !html::has_element(&Html::parse_document(&html), "header") {
            match patch::inject_after_body_open(&html, &self.header) {
                Some(updated) => html = updated,
                None => return Ok(Transform::Problem("no <body> open tag".to_string())),
            }
        }

        if !footer_replaced && !html::has_element(&Html::parse_document(&html), "footer") {
            match patch::inject_before_body_close(&html, &self.footer) {
                Some(updated) => html = updated,
                None => return Ok(Transform::Problem("no </body> close tag".to_string())),
            }
        }

        Ok(Transform::Rewritten(html))
    }
}
