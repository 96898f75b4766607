use std::fmt;
use std::path::PathBuf;

/// Terminal state of one page in a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageOutcome {
    /// Content changed; backup taken (if not already present) and file rewritten
    Written,
    /// Task produced byte-identical content
    Unchanged,
    /// Page lacks what the task needs (e.g. no `<h1>`)
    Ineligible(String),
    /// Page could not be handled (missing insertion point, I/O failure)
    Problem(String),
}

/// Counters aggregated over a run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Human-readable verb phrase, e.g. "Structured data injected into"
    pub label: String,
    pub changed: usize,
    /// Every page that was not written, problems included
    pub skipped: usize,
    pub problems: usize,
    /// Per-page outcomes in processing order
    pub pages: Vec<(PathBuf, PageOutcome)>,
}

impl RunSummary {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Self::default()
        }
    }

    /// Record the outcome of one page
    pub fn record(&mut self, path: PathBuf, outcome: PageOutcome) {
        match &outcome {
            PageOutcome::Written => self.changed += 1,
            PageOutcome::Unchanged | PageOutcome::Ineligible(_) => self.skipped += 1,
            PageOutcome::Problem(_) => {
                self.problems += 1;
                self.skipped += 1;
            }
        }
        self.pages.push((path, outcome));
    }

    /// Total pages seen
    pub fn total(&self) -> usize {
        self.pages.len()
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} files (skipped {}, problems {}).",
            self.label, self.changed, self.skipped, self.problems
        )
    }
}
