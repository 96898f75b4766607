use clap::{Parser, ValueEnum};
use site_patch::TaskKind;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "site-patch")]
#[command(about = "Post-processes a static site's HTML pages in place")]
#[command(version)]
pub struct Args {
    /// Task to run over the pages
    #[arg(value_enum)]
    pub task: TaskArg,

    /// Path to a JSON configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override the site root (directory the site's URLs are relative to)
    #[arg(short, long)]
    pub root: Option<PathBuf>,

    /// Override the content directory, relative to the site root
    #[arg(long)]
    pub content_dir: Option<String>,

    /// Override the domain used for derived canonical URLs
    #[arg(long)]
    pub domain: Option<String>,

    /// Report what would change without writing any file
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum TaskArg {
    /// Insert a "Last updated" marker after the page heading
    LastUpdated,
    /// Inject the shared header and footer partials
    HeaderFooter,
    /// Refresh Article/FAQPage structured data
    Schema,
}

/// Convert from CLI argument task to internal task kind
pub fn convert_task(arg: TaskArg) -> TaskKind {
    match arg {
        TaskArg::LastUpdated => TaskKind::LastUpdated,
        TaskArg::HeaderFooter => TaskKind::HeaderFooter,
        TaskArg::Schema => TaskKind::StructuredData,
    }
}
