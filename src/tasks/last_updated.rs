use crate::config::LastUpdatedConfig;
use crate::error::Result;
use crate::pages::Page;
use crate::parsers::html;
use crate::patch;
use crate::tasks::{PageTask, Transform};
use scraper::Html;

/// Inserts a "Last updated" time marker after the page's `<h1>`
pub struct LastUpdated {
    config: LastUpdatedConfig,
}

impl LastUpdated {
    pub fn new(config: LastUpdatedConfig) -> Self {
        Self { config }
    }

    fn marker(&self, date: &str) -> String {
        format!(
            r#"<p class="{}"><time datetime="{date}">{}: {date}</time></p>"#,
            self.config.class, self.config.label
        )
    }
}

impl PageTask for LastUpdated {
    fn label(&self) -> &'static str {
        "Last updated inserted into"
    }

    fn apply(&self, page: &Page) -> Result<Transform> {
        let doc = Html::parse_document(&page.content);

        if !html::has_element(&doc, "h1") {
            return Ok(Transform::Ineligible("no <h1>".to_string()));
        }
        // Any existing time marker counts as already stamped
        if html::time_datetime(&doc).is_some() {
            return Ok(Transform::Ineligible("already has <time datetime>".to_string()));
        }

        let marker = self.marker(&page.modified.to_string());
        let updated = patch::insert_after_heading(&page.content, &marker)
            .unwrap_or_else(|| page.content.clone());
        Ok(Transform::Rewritten(updated))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn page(content: &str) -> Page {
        let date = NaiveDate::from_ymd_opt(2026, 2, 26).unwrap();
        Page::new("en/a.html", "en/a.html", content, date)
    }

    fn task() -> LastUpdated {
        LastUpdated::new(LastUpdatedConfig::default())
    }

    #[test]
    fn test_inserts_after_heading() {
        let result = task()
            .apply(&page("<body><h1>Guide</h1><p>Intro</p></body>"))
            .unwrap();
        assert_eq!(
            result,
            Transform::Rewritten(
                "<body><h1>Guide</h1>\n<p class=\"last-updated\"><time datetime=\"2026-02-26\">Last updated: 2026-02-26</time></p><p>Intro</p></body>"
                    .to_string()
            )
        );
    }

    #[test]
    fn test_second_run_is_a_no_op() {
        let first = match task().apply(&page("<body><h1>Guide</h1></body>")).unwrap() {
            Transform::Rewritten(html) => html,
            other => panic!("unexpected {other:?}"),
        };
        let second = task().apply(&page(&first)).unwrap();
        assert!(matches!(second, Transform::Ineligible(_)));
        assert_eq!(first.matches("<time").count(), 1);
    }

    #[test]
    fn test_page_without_heading() {
        let result = task().apply(&page("<body><h2>Sub</h2></body>")).unwrap();
        assert_eq!(result, Transform::Ineligible("no <h1>".to_string()));
    }

    #[test]
    fn test_empty_heading_is_eligible() {
        let Transform::Rewritten(html) = task().apply(&page("<body><h1></h1><p>x</p></body>")).unwrap() else {
            panic!("expected rewrite");
        };
        assert!(html.starts_with("<body><h1></h1>\n<p class=\"last-updated\">"));
    }

    #[test]
    fn test_custom_label() {
        let task = LastUpdated::new(LastUpdatedConfig {
            class: "stamp".to_string(),
            label: "Updated".to_string(),
        });
        let Transform::Rewritten(html) = task.apply(&page("<h1>T</h1>")).unwrap() else {
            panic!("expected rewrite");
        };
        assert!(html.contains(r#"<p class="stamp"><time datetime="2026-02-26">Updated: 2026-02-26</time></p>"#));
    }
}
