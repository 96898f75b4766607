use regex::Regex;
use std::path::{Component, Path};

/// Decides which files under the content root are pages to process
///
/// Patterns are matched against the path relative to the site root, with
/// `/` separators (e.g. `en/guide/index.html`).
#[derive(Debug)]
pub struct PathFilter {
    include_regexes: Vec<Regex>,
    exclude_regexes: Vec<Regex>,
}

impl Default for PathFilter {
    fn default() -> Self {
        Self::new(&[r"\.html$".to_string()], &[]).expect("Default regex patterns should be valid")
    }
}

impl PathFilter {
    /// Create a new path filter from include and exclude patterns
    pub fn new(include_patterns: &[String], exclude_patterns: &[String]) -> Result<Self, regex::Error> {
        let mut include_regexes = Vec::with_capacity(include_patterns.len());
        for pattern in include_patterns {
            include_regexes.push(Regex::new(pattern)?);
        }

        let mut exclude_regexes = Vec::with_capacity(exclude_patterns.len());
        for pattern in exclude_patterns {
            exclude_regexes.push(Regex::new(pattern)?);
        }

        Ok(Self {
            include_regexes,
            exclude_regexes,
        })
    }

    /// Determine if a page should be processed based on all filtering rules
    pub fn should_process(&self, rel_path: &Path) -> bool {
        let path = slash_path(rel_path);

        // Exclusions take precedence
        if self.exclude_regexes.iter().any(|regex| regex.is_match(&path)) {
            return false;
        }

        // If include patterns are specified, at least one must match
        self.include_regexes.is_empty() || self.include_regexes.iter().any(|regex| regex.is_match(&path))
    }
}

/// Relative path rendered with `/` separators, without `.` components
pub fn slash_path(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter() {
        let filter = PathFilter::default();
        assert!(filter.should_process(Path::new("en/guide/index.html")));
        assert!(!filter.should_process(Path::new("en/guide/index.html.bak")));
        assert!(!filter.should_process(Path::new("en/style.css")));
    }

    #[test]
    fn test_exclude_takes_precedence() {
        let filter = PathFilter::new(
            &[r"\.html$".to_string()],
            &[r"^en/drafts/".to_string()],
        )
        .unwrap();
        assert!(filter.should_process(Path::new("./en/blog/post.html")));
        assert!(!filter.should_process(Path::new("./en/drafts/post.html")));
    }

    #[test]
    fn test_empty_include_accepts_everything() {
        let filter = PathFilter::new(&[], &[]).unwrap();
        assert!(filter.should_process(Path::new("en/notes.txt")));
    }

    #[test]
    fn test_invalid_pattern() {
        assert!(PathFilter::new(&["(".to_string()], &[]).is_err());
    }

    #[test]
    fn test_slash_path() {
        assert_eq!(slash_path(Path::new("./en/a/b.html")), "en/a/b.html");
    }
}
