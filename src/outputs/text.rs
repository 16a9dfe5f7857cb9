//! Plain-text card layout.

use crate::models::{CardViewModel, Category, ImageRef};
use std::fmt::Write;

/// Render one card as an indented block, numbered from 1.
pub fn card_to_text(position: usize, card: &CardViewModel) -> String {
    let mut out = String::new();
    writeln!(out, "{position:>2}. {}", card.title).ok();
    writeln!(out, "    {} · {}", card.source_name, card.display_date).ok();
    writeln!(out, "    {}", card.description).ok();
    match &card.image {
        ImageRef::Remote { url, .. } => writeln!(out, "    Image: {url}").ok(),
        ImageRef::Placeholder { text } => writeln!(out, "    [{text}]").ok(),
    };
    writeln!(out, "    {} {}", card.read_more_label, card.url).ok();
    out
}

/// Render the category bar, bracketing the active category.
pub fn category_bar(categories: &[Category], active: Category) -> String {
    categories
        .iter()
        .map(|c| {
            if *c == active {
                format!("[{}]", c.label())
            } else {
                c.label()
            }
        })
        .collect::<Vec<_>>()
        .join("  ")
}

/// Render a heading with an underline of matching width.
pub fn heading(text: &str) -> String {
    format!("{text}\n{}\n", "=".repeat(text.chars().count()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::READ_MORE_LABEL;

    fn card(image: ImageRef) -> CardViewModel {
        CardViewModel {
            title: "Markets rally".to_string(),
            url: "https://example.com/markets".to_string(),
            image,
            source_name: "Wire".to_string(),
            display_date: "Mar 15, 2024".to_string(),
            description: "Stocks rose.".to_string(),
            read_more_label: READ_MORE_LABEL,
        }
    }

    #[test]
    fn test_card_to_text_with_image() {
        let text = card_to_text(3, &card(ImageRef::remote("https://example.com/m.png")));
        assert_eq!(
            text,
            " 3. Markets rally\n    Wire · Mar 15, 2024\n    Stocks rose.\n    Image: https://example.com/m.png\n    Read Article → https://example.com/markets\n"
        );
    }

    #[test]
    fn test_card_to_text_placeholder_image() {
        let text = card_to_text(1, &card(ImageRef::placeholder()));
        assert!(text.contains("[Image Not Available]"));
    }

    #[test]
    fn test_category_bar_marks_active() {
        let bar = category_bar(&[Category::General, Category::Sports], Category::Sports);
        assert_eq!(bar, "General  [Sports]");
    }

    #[test]
    fn test_heading_underline() {
        assert_eq!(heading("Health News"), "Health News\n===========\n");
    }
}
