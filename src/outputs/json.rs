//! JSON output for piping headlines into other tools.
//!
//! Every surface event that carries data becomes one JSON document per
//! line:
//!
//! ```text
//! {"category":"technology","heading":"Technology News","cards":[...]}
//! {"category":"science","heading":"Science News","cards":[],"message":"No articles found for the 'science' category."}
//! {"error":"Oops! Couldn't fetch health news. ..."}
//! ```

use crate::controller::empty_message;
use crate::models::{CardViewModel, Category};
use serde::Serialize;

/// One rendered page of cards.
#[derive(Debug, Serialize)]
pub struct Page<'a> {
    pub category: Category,
    pub heading: String,
    pub cards: &'a [CardViewModel],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
struct ErrorLine<'a> {
    error: &'a str,
}

/// Serialize a page of cards on a single line.
pub fn page_to_json(category: Category, cards: &[CardViewModel]) -> serde_json::Result<String> {
    serde_json::to_string(&Page {
        category,
        heading: category.heading(),
        cards,
        message: None,
    })
}

/// Serialize the empty state for `category`.
pub fn empty_to_json(category: Category) -> serde_json::Result<String> {
    serde_json::to_string(&Page {
        category,
        heading: category.heading(),
        cards: &[],
        message: Some(empty_message(category)),
    })
}

/// Serialize an error banner.
pub fn error_to_json(message: &str) -> serde_json::Result<String> {
    serde_json::to_string(&ErrorLine { error: message })
}
