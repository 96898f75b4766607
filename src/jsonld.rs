//! Article and FAQPage structured data.
//!
//! The shapes are plain serde structs so that the emitted JSON keeps the
//! declared key order.

use crate::config::SchemaConfig;
use crate::parsers::{FaqEntry, PageFields};
use serde::Serialize;

const SCHEMA_CONTEXT: &str = "https://schema.org";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleSchema {
    #[serde(rename = "@context")]
    pub context: &'static str,
    #[serde(rename = "@type")]
    pub kind: &'static str,
    pub headline: String,
    pub description: String,
    pub author: Person,
    pub date_published: String,
    pub date_modified: String,
    pub main_entity_of_page: WebPage,
    pub publisher: Organization,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Person {
    #[serde(rename = "@type")]
    pub kind: &'static str,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WebPage {
    #[serde(rename = "@type")]
    pub kind: &'static str,
    #[serde(rename = "@id")]
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Organization {
    #[serde(rename = "@type")]
    pub kind: &'static str,
    pub name: String,
    pub logo: ImageObject,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageObject {
    #[serde(rename = "@type")]
    pub kind: &'static str,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FaqPageSchema {
    #[serde(rename = "@context")]
    pub context: &'static str,
    #[serde(rename = "@type")]
    pub kind: &'static str,
    pub main_entity: Vec<Question>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    #[serde(rename = "@type")]
    pub kind: &'static str,
    pub name: String,
    pub accepted_answer: Answer,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Answer {
    #[serde(rename = "@type")]
    pub kind: &'static str,
    pub text: String,
}

/// Build the Article object for a page
pub fn build_article(fields: &PageFields, config: &SchemaConfig) -> ArticleSchema {
    ArticleSchema {
        context: SCHEMA_CONTEXT,
        kind: "Article",
        headline: fields.headline.clone(),
        description: fields.description.clone(),
        author: Person {
            kind: "Person",
            name: config.author_name.clone(),
        },
        date_published: fields.date_published.clone(),
        date_modified: fields.date_modified.clone(),
        main_entity_of_page: WebPage {
            kind: "WebPage",
            id: fields.canonical.clone(),
        },
        publisher: Organization {
            kind: "Organization",
            name: config.publisher_name.clone(),
            logo: ImageObject {
                kind: "ImageObject",
                url: config.publisher_logo.clone(),
            },
        },
        image: fields.image.clone().filter(|url| !url.is_empty()),
    }
}

/// Build the FAQPage object, or `None` when there are no entries
pub fn build_faq_page(entries: &[FaqEntry]) -> Option<FaqPageSchema> {
    if entries.is_empty() {
        return None;
    }

    let main_entity = entries
        .iter()
        .map(|entry| Question {
            kind: "Question",
            name: entry.question.clone(),
            accepted_answer: Answer {
                kind: "Answer",
                text: entry.answer.clone(),
            },
        })
        .collect();

    Some(FaqPageSchema {
        context: SCHEMA_CONTEXT,
        kind: "FAQPage",
        main_entity,
    })
}

/// Serialize a schema object into a `<script type="application/ld+json">` element
///
/// `</` is written as `<\/` so that no string value can close the script early.
pub fn to_script_tag<T: Serialize>(schema: &T) -> Result<String, serde_json::Error> {
    let json = serde_json::to_string(schema)?.replace("</", r"<\/");
    Ok(format!(r#"<script type="application/ld+json">{json}</script>"#))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn fields() -> PageFields {
        PageFields {
            canonical: "https://www.expenselypro.com/en/guide/".to_string(),
            headline: "Guide".to_string(),
            description: "A guide".to_string(),
            date_published: "2025-01-01".to_string(),
            date_modified: "2026-02-26".to_string(),
            image: None,
            faq: Vec::new(),
        }
    }

    #[test]
    fn test_article_shape() {
        let article = build_article(&fields(), &SchemaConfig::default());
        let value = serde_json::to_value(&article).unwrap();
        assert_eq!(
            value,
            json!({
                "@context": "https://schema.org",
                "@type": "Article",
                "headline": "Guide",
                "description": "A guide",
                "author": {"@type": "Person", "name": "Fouad Shawish"},
                "datePublished": "2025-01-01",
                "dateModified": "2026-02-26",
                "mainEntityOfPage": {
                    "@type": "WebPage",
                    "@id": "https://www.expenselypro.com/en/guide/"
                },
                "publisher": {
                    "@type": "Organization",
                    "name": "Expensely Pro",
                    "logo": {
                        "@type": "ImageObject",
                        "url": "https://www.expenselypro.com/icon.png"
                    }
                }
            })
        );
    }

    #[test]
    fn test_article_image_only_when_present() {
        let mut with_image = fields();
        with_image.image = Some("https://www.expenselypro.com/en/a.png".to_string());
        let value = serde_json::to_value(build_article(&with_image, &SchemaConfig::default())).unwrap();
        assert_eq!(value["image"], "https://www.expenselypro.com/en/a.png");

        let value = serde_json::to_value(build_article(&fields(), &SchemaConfig::default())).unwrap();
        assert!(value.get("image").is_none());
    }

    #[test]
    fn test_key_order_is_stable() {
        let tag = to_script_tag(&build_article(&fields(), &SchemaConfig::default())).unwrap();
        let context = tag.find("\"@context\"").unwrap();
        let kind = tag.find("\"@type\":\"Article\"").unwrap();
        let headline = tag.find("\"headline\"").unwrap();
        assert!(context < kind && kind < headline);
    }

    #[test]
    fn test_faq_page() {
        assert!(build_faq_page(&[]).is_none());

        let entries = vec![FaqEntry {
            question: "Is it free?".to_string(),
            answer: "Yes.".to_string(),
        }];
        let value = serde_json::to_value(build_faq_page(&entries).unwrap()).unwrap();
        assert_eq!(
            value,
            json!({
                "@context": "https://schema.org",
                "@type": "FAQPage",
                "mainEntity": [{
                    "@type": "Question",
                    "name": "Is it free?",
                    "acceptedAnswer": {"@type": "Answer", "text": "Yes."}
                }]
            })
        );
    }

    #[test]
    fn test_script_tag_escapes_closing_sequence() {
        let mut page = fields();
        page.headline = "Ends </script> here, ünïcode kept".to_string();
        let tag = to_script_tag(&build_article(&page, &SchemaConfig::default())).unwrap();
        assert!(tag.starts_with(r#"<script type="application/ld+json">{"#));
        assert!(tag.ends_with("}</script>"));
        assert_eq!(tag.matches("</script>").count(), 1);
        assert!(tag.contains("ünïcode"));

        let json = &tag[r#"<script type="application/ld+json">"#.len()..tag.len() - "</script>".len()];
        let value: Value = serde_json::from_str(json).unwrap();
        assert_eq!(value["headline"], "Ends </script> here, ünïcode kept");
    }
}
