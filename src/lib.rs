pub mod config;
pub mod error;
pub mod filter;
pub mod jsonld;
pub mod pages;
pub mod parsers;
pub mod patch;
pub mod results;
pub mod tasks;

// Re-export commonly used types for convenience
pub use config::SiteConfig;
pub use error::{Error, Result};
pub use results::{PageOutcome, RunSummary};

use filter::PathFilter;
use pages::Page;
use std::path::{Path, PathBuf};
use tasks::{HeaderFooter, LastUpdated, PageTask, StructuredData, Transform};

/// The page tasks that can be run over a site
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskKind {
    /// Stamp pages with a "Last updated" time marker
    LastUpdated,
    /// Inject the shared header and footer partials
    HeaderFooter,
    /// Refresh Article and FAQPage JSON-LD
    StructuredData,
}

/// Main builder for a run of one task over the site's pages
pub struct Patcher {
    task: TaskKind,
    config: SiteConfig,
    dry_run: bool,
}

impl Patcher {
    /// Create a new Patcher for the given task with default configuration
    pub fn new(task: TaskKind) -> Self {
        Self {
            task,
            config: SiteConfig::default(),
            dry_run: false,
        }
    }

    /// Apply a configuration
    pub fn with_config(mut self, config: SiteConfig) -> Self {
        self.config = config;
        self
    }

    /// Load configuration from a JSON file
    pub fn with_config_file(self, path: impl AsRef<Path>) -> Result<Self> {
        let config = SiteConfig::from_file(path)?;
        Ok(self.with_config(config))
    }

    /// Load configuration from a JSON string
    pub fn with_config_str(self, json: &str) -> Result<Self> {
        let config = SiteConfig::from_json(json)?;
        Ok(self.with_config(config))
    }

    /// Override the site root
    pub fn with_site_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.config.site_root = root.into();
        self
    }

    /// Override the content directory (relative to the site root)
    pub fn with_content_dir(mut self, dir: impl Into<String>) -> Self {
        self.config.content_dir = dir.into();
        self
    }

    /// Override the domain used for derived URLs
    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.config.domain = domain.into();
        self
    }

    /// Compute outcomes without touching any file
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Run the task over every page and return the aggregated counters
    ///
    /// Fails only on fatal conditions: invalid configuration, a missing
    /// content directory or a missing partial. Everything else is counted.
    pub fn run(self) -> Result<RunSummary> {
        self.config.domain_url()?;

        let task: Box<dyn PageTask> = match self.task {
            TaskKind::LastUpdated => Box::new(LastUpdated::new(self.config.last_updated.clone())),
            TaskKind::HeaderFooter => Box::new(HeaderFooter::load(&self.config)?),
            TaskKind::StructuredData => Box::new(StructuredData::new(self.config.clone())),
        };

        run_task(task.as_ref(), &self.config, self.dry_run)
    }
}

/// Apply `task` to every page under the configured content root
pub fn run_task(task: &dyn PageTask, config: &SiteConfig, dry_run: bool) -> Result<RunSummary> {
    let filter = PathFilter::new(&config.include_patterns, &config.exclude_patterns)?;
    let paths = pages::discover(&config.content_root(), &config.site_root, &filter)?;

    ::log::info!(
        "Running '{}' over {} pages in {}",
        task.label(),
        paths.len(),
        config.content_root().display()
    );

    let mut summary = RunSummary::new(task.label());
    for path in paths {
        let rel_path = path.strip_prefix(&config.site_root).unwrap_or(&path);
        if !task.accepts(rel_path) {
            continue;
        }

        let outcome = process_page(task, &path, config, dry_run);
        ::log::debug!("{}: {:?}", path.display(), outcome);
        summary.record(path, outcome);
    }

    ::log::info!(
        "Finished: {} changed, {} skipped, {} problems",
        summary.changed,
        summary.skipped,
        summary.problems
    );
    Ok(summary)
}

/// Read, transform and (when changed) back up and rewrite a single page
fn process_page(task: &dyn PageTask, path: &Path, config: &SiteConfig, dry_run: bool) -> PageOutcome {
    let page = match Page::read(path, &config.site_root) {
        Ok(page) => page,
        Err(e) => {
            ::log::warn!("{}", e);
            return PageOutcome::Problem(e.to_string());
        }
    };

    let updated = match task.apply(&page) {
        Ok(Transform::Rewritten(updated)) => updated,
        Ok(Transform::Ineligible(reason)) => return PageOutcome::Ineligible(reason),
        Ok(Transform::Problem(reason)) => {
            ::log::warn!("{}: {}", path.display(), reason);
            return PageOutcome::Problem(reason);
        }
        Err(e) => {
            ::log::warn!("{}: {}", path.display(), e);
            return PageOutcome::Problem(e.to_string());
        }
    };

    if updated == page.content {
        return PageOutcome::Unchanged;
    }
    if dry_run {
        return PageOutcome::Written;
    }

    match page.commit(&updated, &config.backup_ext) {
        Ok(()) => PageOutcome::Written,
        Err(e) => {
            ::log::warn!("{}", e);
            PageOutcome::Problem(e.to_string())
        }
    }
}
