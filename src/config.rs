use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use url::Url;

/// Configuration shared by every page task
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Directory that the site's URLs are relative to
    #[serde(default = "default_site_root")]
    pub site_root: PathBuf,

    /// Sub-directory of `site_root` holding the pages to process
    #[serde(default = "default_content_dir")]
    pub content_dir: String,

    /// Site origin used for derived canonical URLs
    #[serde(default = "default_domain")]
    pub domain: String,

    /// Suffix appended to a file name for its one-time backup
    #[serde(default = "default_backup_ext")]
    pub backup_ext: String,

    /// Regex patterns for page paths to include (relative to `site_root`)
    #[serde(default = "default_include_patterns")]
    pub include_patterns: Vec<String>,

    /// Regex patterns for page paths to exclude (these take precedence)
    #[serde(default)]
    pub exclude_patterns: Vec<String>,

    /// Structured-data settings
    #[serde(default)]
    pub schema: SchemaConfig,

    /// Header/footer partial settings
    #[serde(default)]
    pub partials: PartialsConfig,

    /// Last-updated marker settings
    #[serde(default)]
    pub last_updated: LastUpdatedConfig,
}

/// Settings for the Article/FAQPage generator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaConfig {
    #[serde(default = "default_author_name")]
    pub author_name: String,

    #[serde(default = "default_publisher_name")]
    pub publisher_name: String,

    #[serde(default = "default_publisher_logo")]
    pub publisher_logo: String,

    /// Heading keywords that mark an FAQ section (matched case-insensitively)
    #[serde(default = "default_faq_keywords")]
    pub faq_keywords: Vec<String>,

    #[serde(default = "default_max_faq_entries")]
    pub max_faq_entries: usize,

    #[serde(default = "default_max_description_chars")]
    pub max_description_chars: usize,
}

/// Settings for the header/footer injector
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartialsConfig {
    /// Directory of the partials, relative to the content directory
    #[serde(default = "default_partials_dir")]
    pub dir: String,

    #[serde(default = "default_header_file")]
    pub header_file: String,

    #[serde(default = "default_footer_file")]
    pub footer_file: String,

    #[serde(default = "default_header_start")]
    pub header_start: String,

    #[serde(default = "default_header_end")]
    pub header_end: String,

    #[serde(default = "default_footer_start")]
    pub footer_start: String,

    #[serde(default = "default_footer_end")]
    pub footer_end: String,
}

/// Settings for the last-updated marker
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LastUpdatedConfig {
    #[serde(default = "default_last_updated_class")]
    pub class: String,

    #[serde(default = "default_last_updated_label")]
    pub label: String,
}

impl SiteConfig {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let mut file = File::open(path).map_err(|e| crate::Error::io(path, e))?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)
            .map_err(|e| crate::Error::io(path, e))?;

        Self::from_json(&contents)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json).map_err(crate::Error::Config)?;
        config.domain_url()?;
        Ok(config)
    }

    /// Root of the tree that gets scanned for pages
    pub fn content_root(&self) -> PathBuf {
        self.site_root.join(&self.content_dir)
    }

    /// Directory holding the header/footer partials
    pub fn partials_root(&self) -> PathBuf {
        self.content_root().join(&self.partials.dir)
    }

    /// The domain parsed as a URL
    pub fn domain_url(&self) -> Result<Url> {
        Ok(Url::parse(&self.domain)?)
    }

    /// `<domain>/<content_dir>/`, the base for relative references when a page has no usable canonical
    pub fn content_base_url(&self) -> Result<Url> {
        let dir = self.content_dir.trim_matches('/');
        let path = if dir.is_empty() {
            "/".to_string()
        } else {
            format!("/{dir}/")
        };
        Ok(self.domain_url()?.join(&path)?)
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            site_root: default_site_root(),
            content_dir: default_content_dir(),
            domain: default_domain(),
            backup_ext: default_backup_ext(),
            include_patterns: default_include_patterns(),
            exclude_patterns: Vec::new(),
            schema: SchemaConfig::default(),
            partials: PartialsConfig::default(),
            last_updated: LastUpdatedConfig::default(),
        }
    }
}

impl Default for SchemaConfig {
    fn default() -> Self {
        Self {
            author_name: default_author_name(),
            publisher_name: default_publisher_name(),
            publisher_logo: default_publisher_logo(),
            faq_keywords: default_faq_keywords(),
            max_faq_entries: default_max_faq_entries(),
            max_description_chars: default_max_description_chars(),
        }
    }
}

impl Default for PartialsConfig {
    fn default() -> Self {
        Self {
            dir: default_partials_dir(),
            header_file: default_header_file(),
            footer_file: default_footer_file(),
            header_start: default_header_start(),
            header_end: default_header_end(),
            footer_start: default_footer_start(),
            footer_end: default_footer_end(),
        }
    }
}

impl Default for LastUpdatedConfig {
    fn default() -> Self {
        Self {
            class: default_last_updated_class(),
            label: default_last_updated_label(),
        }
    }
}

fn default_site_root() -> PathBuf {
    PathBuf::from(".")
}

fn default_content_dir() -> String {
    "en".to_string()
}

fn default_domain() -> String {
    "https://www.expenselypro.com".to_string()
}

fn default_backup_ext() -> String {
    ".bak".to_string()
}

fn default_include_patterns() -> Vec<String> {
    vec![r"\.html$".to_string()]
}

fn default_author_name() -> String {
    "Fouad Shawish".to_string()
}

fn default_publisher_name() -> String {
    "Expensely Pro".to_string()
}

fn default_publisher_logo() -> String {
    "https://www.expenselypro.com/icon.png".to_string()
}

fn default_faq_keywords() -> Vec<String> {
    vec![
        "FAQ".to_string(),
        "Questions".to_string(),
        "أسئلة".to_string(),
    ]
}

fn default_max_faq_entries() -> usize {
    8
}

fn default_max_description_chars() -> usize {
    300
}

fn default_partials_dir() -> String {
    "_partials".to_string()
}

fn default_header_file() -> String {
    "header.html".to_string()
}

fn default_footer_file() -> String {
    "footer.html".to_string()
}

fn default_header_start() -> String {
    "<!-- SITE_HEADER_START -->".to_string()
}

fn default_header_end() -> String {
    "<!-- SITE_HEADER_END -->".to_string()
}

fn default_footer_start() -> String {
    "<!-- SITE_FOOTER_START -->".to_string()
}

fn default_footer_end() -> String {
    "<!-- SITE_FOOTER_END -->".to_string()
}

fn default_last_updated_class() -> String {
    "last-updated".to_string()
}

fn default_last_updated_label() -> String {
    "Last updated".to_string()
}
