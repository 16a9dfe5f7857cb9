//! Markdown card layout.
//!
//! Each card becomes a `###` section whose title links to the article.
//! Remote images are emitted as HTML `<img>` tags so the lazy-load hint and
//! the not-available fallback survive in renderers that accept inline HTML.

use crate::models::{CardViewModel, ImageRef};
use std::fmt::Write;

/// Render one card as a Markdown section.
pub fn card_to_markdown(card: &CardViewModel) -> String {
    let mut md = String::new();
    writeln!(md, "### [{}]({})\n", escape(&card.title), card.url).ok();

    match &card.image {
        ImageRef::Remote { url, lazy, fallback } => {
            let loading = if *lazy { " loading=\"lazy\"" } else { "" };
            writeln!(md, "<img src=\"{url}\" alt=\"{fallback}\"{loading}>\n").ok();
        }
        ImageRef::Placeholder { text } => {
            writeln!(md, "> _{text}_\n").ok();
        }
    }

    writeln!(md, "**{}** · {}\n", escape(&card.source_name), card.display_date).ok();
    writeln!(md, "{}\n", escape(&card.description)).ok();
    writeln!(md, "[{}]({})\n", card.read_more_label, card.url).ok();
    md
}

fn escape(text: &str) -> String {
    text.replace('[', "\\[").replace(']', "\\]")
}
