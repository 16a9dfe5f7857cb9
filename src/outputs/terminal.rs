//! A [`Surface`] that writes to a terminal or any other writer.

use super::{OutputFormat, json, markdown, text};
use crate::controller::{CATEGORIES_UNAVAILABLE, Surface, empty_message};
use crate::models::{CardViewModel, Category};
use std::io::{self, Write};
use tracing::warn;

/// Writes surface events to `out` in the chosen [`OutputFormat`].
///
/// In JSON mode only data-bearing events (cards, empty state, errors) are
/// written, so the stream stays machine-readable.
#[derive(Debug)]
pub struct TerminalSurface<W> {
    out: W,
    format: OutputFormat,
}

impl TerminalSurface<io::Stdout> {
    pub fn stdout(format: OutputFormat) -> Self {
        Self::new(io::stdout(), format)
    }
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(out: W, format: OutputFormat) -> Self {
        Self { out, format }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, chunk: &str) {
        let result = self
            .out
            .write_all(chunk.as_bytes())
            .and_then(|_| self.out.flush());
        if let Err(e) = result {
            warn!(error = %e, "Failed writing to terminal");
        }
    }

    fn emit_json(&mut self, line: serde_json::Result<String>) {
        match line {
            Ok(line) => self.emit(&format!("{line}\n")),
            Err(e) => warn!(error = %e, "Failed serializing output"),
        }
    }

    fn is_json(&self) -> bool {
        self.format == OutputFormat::Json
    }
}

impl<W: Write> Surface for TerminalSurface<W> {
    fn show_loading(&mut self) {
        if !self.is_json() {
            self.emit("Loading headlines…\n");
        }
    }

    fn hide_loading(&mut self) {}

    fn show_error(&mut self, message: &str) {
        match self.format {
            OutputFormat::Json => self.emit_json(json::error_to_json(message)),
            OutputFormat::Markdown => self.emit(&format!("> **Error:** {message}\n\n")),
            OutputFormat::Text => self.emit(&format!("! {message}\n")),
        }
    }

    fn render(&mut self, category: Category, cards: &[CardViewModel]) {
        match self.format {
            OutputFormat::Json => self.emit_json(json::page_to_json(category, cards)),
            OutputFormat::Markdown => {
                let md = cards.iter().map(markdown::card_to_markdown).collect::<String>();
                self.emit(&md);
            }
            OutputFormat::Text => {
                let body = cards
                    .iter()
                    .enumerate()
                    .map(|(i, card)| text::card_to_text(i + 1, card))
                    .collect::<Vec<_>>()
                    .join("\n");
                self.emit(&format!("{body}\n"));
            }
        }
    }

    fn show_empty(&mut self, category: Category) {
        match self.format {
            OutputFormat::Json => self.emit_json(json::empty_to_json(category)),
            _ => self.emit(&format!("{}\n", empty_message(category))),
        }
    }

    fn set_heading(&mut self, heading: &str) {
        match self.format {
            OutputFormat::Json => {}
            OutputFormat::Markdown => self.emit(&format!("## {heading}\n\n")),
            OutputFormat::Text => self.emit(&format!("\n{}", text::heading(heading))),
        }
    }

    fn show_categories(&mut self, categories: &[Category], active: Category) {
        if !self.is_json() {
            self.emit(&format!("{}\n", text::category_bar(categories, active)));
        }
    }

    fn mark_active(&mut self, category: Category) {
        self.show_categories(&Category::ALL, category);
    }

    fn show_categories_unavailable(&mut self) {
        if !self.is_json() {
            self.emit(&format!("{CATEGORIES_UNAVAILABLE}\n"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ImageRef, READ_MORE_LABEL};

    fn card(title: &str) -> CardViewModel {
        CardViewModel {
            title: title.to_string(),
            url: "https://example.com".to_string(),
            image: ImageRef::placeholder(),
            source_name: "Wire".to_string(),
            display_date: "Date unavailable".to_string(),
            description: "D".to_string(),
            read_more_label: READ_MORE_LABEL,
        }
    }

    fn written(surface: TerminalSurface<Vec<u8>>) -> String {
        String::from_utf8(surface.into_inner()).unwrap()
    }

    #[test]
    fn test_text_render_numbers_cards() {
        let mut surface = TerminalSurface::new(Vec::new(), OutputFormat::Text);
        surface.render(Category::General, &[card("first"), card("second")]);
        let out = written(surface);
        assert!(out.contains(" 1. first"));
        assert!(out.contains(" 2. second"));
    }

    #[test]
    fn test_text_startup_sequence() {
        let mut surface = TerminalSurface::new(Vec::new(), OutputFormat::Text);
        surface.show_categories(&Category::ALL, Category::General);
        surface.set_heading("General News");
        surface.show_loading();
        let out = written(surface);
        assert!(out.starts_with("[General]  Business"));
        assert!(out.contains("General News\n============\n"));
        assert!(out.ends_with("Loading headlines…\n"));
    }

    #[test]
    fn test_json_mode_only_writes_data() {
        let mut surface = TerminalSurface::new(Vec::new(), OutputFormat::Json);
        surface.show_categories(&Category::ALL, Category::General);
        surface.set_heading("General News");
        surface.show_loading();
        surface.show_empty(Category::Health);
        surface.show_error("boom");

        let out = written(surface);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("No articles found for the 'health' category."));
        assert_eq!(lines[1], r#"{"error":"boom"}"#);
    }

    #[test]
    fn test_markdown_error_and_unavailable() {
        let mut surface = TerminalSurface::new(Vec::new(), OutputFormat::Markdown);
        surface.show_error("API Key is missing!");
        surface.show_categories_unavailable();
        let out = written(surface);
        assert!(out.contains("> **Error:** API Key is missing!"));
        assert!(out.contains(CATEGORIES_UNAVAILABLE));
    }
}
