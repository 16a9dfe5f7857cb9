//! Projection of raw provider articles into display cards.
//!
//! Articles without both a title and a url are dropped silently; the
//! survivors keep their relative order. Every other field has a fallback,
//! so a surviving article always yields exactly one card.

use crate::models::{CardViewModel, ImageRef, RawArticle, READ_MORE_LABEL};
use crate::utils::{format_date, truncate_description, truncate_title};
use tracing::debug;

/// Source name used when the article does not name one.
pub const UNKNOWN_SOURCE: &str = "Unknown Source";

/// Map an ordered article list to cards, one per displayable article.
pub fn project_articles(articles: &[RawArticle]) -> Vec<CardViewModel> {
    let cards: Vec<CardViewModel> = articles.iter().filter_map(project_article).collect();

    let dropped = articles.len() - cards.len();
    if dropped > 0 {
        debug!(dropped, kept = cards.len(), "Skipped articles missing title or url");
    }
    cards
}

/// Project a single article, or `None` if it lacks a title or url.
pub fn project_article(article: &RawArticle) -> Option<CardViewModel> {
    let title = non_empty(article.title.as_deref())?;
    let url = non_empty(article.url.as_deref())?;

    let image = match non_empty(article.url_to_image.as_deref()) {
        Some(src) => ImageRef::remote(src),
        None => ImageRef::placeholder(),
    };

    let source_name = article
        .source
        .as_ref()
        .and_then(|s| non_empty(s.name.as_deref()))
        .unwrap_or(UNKNOWN_SOURCE)
        .to_string();

    Some(CardViewModel {
        title: truncate_title(title),
        url: url.to_string(),
        image,
        source_name,
        display_date: format_date(article.published_at.as_deref()),
        description: truncate_description(article.description.as_deref().unwrap_or_default()),
        read_more_label: READ_MORE_LABEL,
    })
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
