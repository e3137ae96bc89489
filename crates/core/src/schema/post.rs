//! Blog posts.

use serde_json::Value;

use super::fields::{self, Fields};
use super::{Record, ValidationError};
use crate::document::Document;
use crate::types::{CountryCode, WebUrl};

/// A Markdown blog post, optionally targeted at one market.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    title: String,
    slug: String,
    excerpt: Option<String>,
    content_md: String,
    country: Option<CountryCode>,
    cover_image: Option<WebUrl>,
}

impl Post {
    /// Post title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// URL slug.
    #[must_use]
    pub fn slug(&self) -> &str {
        &self.slug
    }

    /// Short teaser shown in listings.
    #[must_use]
    pub fn excerpt(&self) -> Option<&str> {
        self.excerpt.as_deref()
    }

    /// Markdown body.
    #[must_use]
    pub fn content_md(&self) -> &str {
        &self.content_md
    }

    /// Market the post is written for, if any.
    #[must_use]
    pub const fn country(&self) -> Option<CountryCode> {
        self.country
    }

    /// Cover image.
    #[must_use]
    pub const fn cover_image(&self) -> Option<&WebUrl> {
        self.cover_image.as_ref()
    }
}

impl Record for Post {
    const COLLECTION: &'static str = "post";

    fn from_document(document: &Document) -> Result<Self, ValidationError> {
        let f = Fields::new(document);
        Ok(Self {
            title: f.required_str("title")?,
            slug: f.required_str("slug")?,
            excerpt: f.optional_str("excerpt")?,
            content_md: f.required_str("content_md")?,
            country: f.optional_country("country")?,
            cover_image: f.optional_url("cover_image")?,
        })
    }

    fn to_document(&self) -> Document {
        let mut doc = Document::new();
        doc.insert("title".into(), Value::from(self.title.as_str()));
        doc.insert("slug".into(), Value::from(self.slug.as_str()));
        doc.insert("excerpt".into(), fields::opt(self.excerpt.as_deref()));
        doc.insert("content_md".into(), Value::from(self.content_md.as_str()));
        doc.insert("country".into(), fields::opt(self.country));
        doc.insert(
            "cover_image".into(),
            fields::opt(self.cover_image.as_ref().map(fields::url)),
        );
        doc
    }
}

impl_record_serde!(Post);

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_minimal_post() {
        let post = Post::from_value(&json!({
            "title": "Best MacBook deals this week",
            "slug": "best-deals",
            "content_md": "# Deals\n\nAll the prices."
        }))
        .unwrap();

        assert_eq!(post.slug(), "best-deals");
        assert_eq!(post.excerpt(), None);
        assert_eq!(post.country(), None);
        assert_eq!(post.cover_image(), None);
    }

    #[test]
    fn test_content_required() {
        assert_eq!(
            Post::from_value(&json!({"title": "Draft", "slug": "draft"})),
            Err(ValidationError::Missing {
                field: "content_md"
            })
        );
    }

    #[test]
    fn test_optional_country_still_checked() {
        let result = Post::from_value(&json!({
            "title": "Deals in Germany",
            "slug": "de",
            "content_md": "...",
            "country": "DE"
        }));
        assert!(matches!(
            result,
            Err(ValidationError::NotAllowed {
                field: "country",
                ..
            })
        ));
    }

    #[test]
    fn test_roundtrip() {
        let post = Post::from_value(&json!({
            "title": "MacBook Air vs Pro",
            "slug": "air-vs-pro",
            "excerpt": "Which one should you buy?",
            "content_md": "Short answer: it depends.",
            "country": "BE",
            "cover_image": "https://cdn.example.com/air-vs-pro.jpg"
        }))
        .unwrap();

        let doc = post.to_document();
        assert_eq!(doc.len(), 6);
        assert_eq!(Post::from_document(&doc).unwrap(), post);
    }

    #[test]
    fn test_roundtrip_minimal_and_unicode() {
        for input in [
            json!({"title": "", "slug": "", "content_md": ""}),
            json!({
                "title": "Beste MacBook-deals – België 🇧🇪",
                "slug": "beste-deals-be",
                "excerpt": "\"Quotes\" and\nnewlines",
                "content_md": "# Kop\n\n* één\n* twee",
                "country": "BE",
                "cover_image": "https://cdn.example.com/a%20b.jpg?w=1200&h=630"
            }),
        ] {
            let post = Post::from_value(&input).unwrap();
            assert_eq!(Post::from_document(&post.to_document()).unwrap(), post);

            let text = serde_json::to_string(&post).unwrap();
            assert_eq!(serde_json::from_str::<Post>(&text).unwrap(), post);
        }
    }
}
