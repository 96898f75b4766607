pub mod header_footer;
pub mod last_updated;
pub mod structured_data;

use crate::error::Result;
use crate::pages::Page;
use std::path::Path;

pub use header_footer::HeaderFooter;
pub use last_updated::LastUpdated;
pub use structured_data::StructuredData;

/// What a task made of one page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transform {
    /// The page lacks the structure this task needs; left alone
    Ineligible(String),
    /// The page needs an edit that cannot be made; left alone
    Problem(String),
    /// New page text, possibly identical to the original
    Rewritten(String),
}

/// A text transformation applied to every page of a run
pub trait PageTask {
    /// Verb phrase for the summary line, e.g. "Last updated inserted into"
    fn label(&self) -> &'static str;

    /// Whether a discovered page belongs to this task at all
    fn accepts(&self, _rel_path: &Path) -> bool {
        true
    }

    /// Transform one page
    fn apply(&self, page: &Page) -> Result<Transform>;
}
