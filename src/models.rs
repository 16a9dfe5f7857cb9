//! Data models for headline requests, raw API payloads and display cards.
//!
//! This module defines the core data structures used throughout the crate:
//! - [`Category`]: The fixed set of topic filters accepted by the headlines endpoint
//! - [`HeadlinesResponse`] / [`RawArticle`]: Untrusted payload shapes from the news API
//! - [`CardViewModel`] / [`ImageRef`]: Display-ready projection of one article
//!
//! The raw models use camelCase field names to match the JSON returned by
//! the news provider, hence the `rename_all` attributes.

use crate::utils::capitalize;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Text shown in place of an article image that is absent or fails to load.
pub const IMAGE_PLACEHOLDER: &str = "Image Not Available";

/// Label of the link that opens the full article.
pub const READ_MORE_LABEL: &str = "Read Article →";

/// A topic filter applied to the headline query.
///
/// Exactly one category is active at any time; [`Category::General`] is the
/// startup default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[default]
    General,
    Business,
    Technology,
    Entertainment,
    Sports,
    Health,
    Science,
}

impl Category {
    /// Every category, in display order.
    pub const ALL: [Category; 7] = [
        Category::General,
        Category::Business,
        Category::Technology,
        Category::Entertainment,
        Category::Sports,
        Category::Health,
        Category::Science,
    ];

    /// The query value sent to the API.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::General => "general",
            Category::Business => "business",
            Category::Technology => "technology",
            Category::Entertainment => "entertainment",
            Category::Sports => "sports",
            Category::Health => "health",
            Category::Science => "science",
        }
    }

    /// Button label, e.g. `"Technology"`.
    pub fn label(&self) -> String {
        capitalize(self.as_str())
    }

    /// Heading text shown above the cards, e.g. `"Technology News"`.
    pub fn heading(&self) -> String {
        format!("{} News", self.label())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string names no known [`Category`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown category: {0:?}")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == wanted)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

/// Top-level body of a headlines response, success or error.
///
/// Error bodies carry `status: "error"` plus `code` and `message`;
/// success bodies carry `status: "ok"` and `articles`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeadlinesResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub total_results: Option<u64>,
    #[serde(default, deserialize_with = "lenient_articles")]
    pub articles: Option<Vec<RawArticle>>,
}

/// An article exactly as the provider sent it.
///
/// Every field is optional; only entries with both a title and a url are
/// displayable. A field of the wrong JSON type decodes as `None` rather
/// than failing the whole page.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawArticle {
    #[serde(default, deserialize_with = "lenient")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub url_to_image: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub published_at: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub source: Option<RawSource>,
}

/// The `source` object nested in a [`RawArticle`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawSource {
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
}

/// Decode a field, mapping `null` or a wrong-typed value to `None`.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Decode the article array one entry at a time.
///
/// Entries that are not objects become an empty [`RawArticle`], which the
/// projector drops like any other article missing its title and url.
fn lenient_articles<'de, D>(deserializer: D) -> Result<Option<Vec<RawArticle>>, D::Error>
where
    D: Deserializer<'de>,
{
    let items = Option::<Vec<serde_json::Value>>::deserialize(deserializer)?;
    Ok(items.map(|items| {
        items
            .into_iter()
            .map(|item| serde_json::from_value(item).unwrap_or_default())
            .collect()
    }))
}

/// How a card presents its image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ImageRef {
    /// A remote image, loaded lazily; `fallback` replaces it if loading fails.
    Remote {
        url: String,
        lazy: bool,
        fallback: &'static str,
    },
    /// No image was supplied.
    Placeholder { text: &'static str },
}

impl ImageRef {
    pub fn remote(url: impl Into<String>) -> Self {
        ImageRef::Remote {
            url: url.into(),
            lazy: true,
            fallback: IMAGE_PLACEHOLDER,
        }
    }

    pub fn placeholder() -> Self {
        ImageRef::Placeholder {
            text: IMAGE_PLACEHOLDER,
        }
    }
}

/// Display-ready projection of one article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardViewModel {
    /// Title, at most 80 characters before the ellipsis.
    pub title: String,
    pub url: String,
    pub image: ImageRef,
    pub source_name: String,
    pub display_date: String,
    /// Description, word-boundary truncated or a placeholder.
    pub description: String,
    pub read_more_label: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_round_trips_through_str() {
        for category in Category::ALL {
            assert_eq!(category.as_str().parse::<Category>(), Ok(category));
        }
    }

    #[test]
    fn test_category_parse_is_case_insensitive_and_trims() {
        assert_eq!(" Technology ".parse::<Category>(), Ok(Category::Technology));
        assert_eq!("SPORTS".parse::<Category>(), Ok(Category::Sports));
    }

    #[test]
    fn test_category_parse_rejects_unknown_and_empty() {
        assert!("weather".parse::<Category>().is_err());
        assert!("".parse::<Category>().is_err());
    }

    #[test]
    fn test_category_default_is_general() {
        assert_eq!(Category::default(), Category::General);
    }

    #[test]
    fn test_category_heading() {
        assert_eq!(Category::Science.label(), "Science");
        assert_eq!(Category::Entertainment.heading(), "Entertainment News");
    }

    #[test]
    fn test_headlines_response_deserialization() {
        let json = r#"{
            "status": "ok",
            "totalResults": 2,
            "articles": [
                {
                    "source": {"id": "example-times", "name": "Example Times"},
                    "title": "Headline",
                    "url": "https://example.com/a",
                    "urlToImage": "https://example.com/a.jpg",
                    "publishedAt": "2024-03-15T12:00:00Z"
                },
                {"title": null, "url": "https://example.com/b"}
            ]
        }"#;

        let resp: HeadlinesResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.status.as_deref(), Some("ok"));
        assert_eq!(resp.total_results, Some(2));
        let articles = resp.articles.unwrap();
        assert_eq!(articles.len(), 2);
        assert_eq!(
            articles[0].url_to_image.as_deref(),
            Some("https://example.com/a.jpg")
        );
        assert_eq!(
            articles[0].source.as_ref().and_then(|s| s.name.as_deref()),
            Some("Example Times")
        );
        assert!(articles[1].title.is_none());
    }

    #[test]
    fn test_error_response_deserialization() {
        let json = r#"{"status":"error","code":"apiKeyInvalid","message":"Your API key is invalid."}"#;
        let resp: HeadlinesResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.code.as_deref(), Some("apiKeyInvalid"));
        assert!(resp.articles.is_none());
    }

    #[test]
    fn test_wrong_typed_fields_decode_as_none() {
        let json = r#"{
            "status": "ok",
            "articles": [
                {"title": "good", "url": "https://a", "source": "CNN"},
                {"title": 7, "url": "https://b", "description": ["x"]},
                42,
                {"title": "also good", "url": "https://c", "source": {"name": 9}}
            ]
        }"#;

        let resp: HeadlinesResponse = serde_json::from_str(json).unwrap();
        let articles = resp.articles.unwrap();
        assert_eq!(articles.len(), 4);
        assert_eq!(articles[0].title.as_deref(), Some("good"));
        assert!(articles[0].source.is_none());
        assert!(articles[1].title.is_none());
        assert_eq!(articles[1].url.as_deref(), Some("https://b"));
        assert!(articles[1].description.is_none());
        assert!(articles[2].title.is_none() && articles[2].url.is_none());
        assert!(articles[3].source.as_ref().unwrap().name.is_none());
    }

    #[test]
    fn test_card_serialization_tags_image_kind() {
        let card = CardViewModel {
            title: "T".to_string(),
            url: "https://example.com".to_string(),
            image: ImageRef::placeholder(),
            source_name: "Unknown Source".to_string(),
            display_date: "Date unavailable".to_string(),
            description: "D".to_string(),
            read_more_label: READ_MORE_LABEL,
        };

        let json = serde_json::to_string(&card).unwrap();
        assert!(json.contains(r#""kind":"placeholder""#));
        assert!(json.contains("Image Not Available"));
    }
}
