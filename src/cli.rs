//! Command-line interface definitions for Headline Deck.
//!
//! Every option can be given as a flag; the credential can also come from
//! the `NEWS_API_KEY` environment variable. Flags override values from the
//! YAML config file.

use headline_deck::config::Settings;
use headline_deck::models::Category;
use headline_deck::outputs::OutputFormat;
use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments for the Headline Deck application.
///
/// # Examples
///
/// ```sh
/// # Show today's general headlines
/// headline_deck --api-key YOUR_KEY
///
/// # Browse interactively, starting from technology
/// NEWS_API_KEY=... headline_deck -i --category technology
///
/// # Emit JSON for another tool
/// headline_deck --category science --format json
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Optional path to a config.yaml file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// News API key
    #[arg(long, env = "NEWS_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Two-letter country code for the headlines
    #[arg(long)]
    pub country: Option<String>,

    /// Number of articles requested per category
    #[arg(long)]
    pub page_size: Option<u32>,

    /// Top-headlines endpoint URL
    #[arg(long)]
    pub base_url: Option<String>,

    /// Category shown first
    #[arg(long, default_value = "general", value_parser = parse_category)]
    pub category: Category,

    /// How cards are written to stdout
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Keep running and read category names from stdin
    #[arg(short, long)]
    pub interactive: bool,
}

impl Cli {
    /// Layer the command-line overrides on top of file settings.
    pub fn apply_overrides(&self, mut settings: Settings) -> Settings {
        if let Some(key) = &self.api_key {
            settings.api_key = Some(key.clone());
        }
        if let Some(country) = &self.country {
            settings.country = country.clone();
        }
        if let Some(page_size) = self.page_size {
            settings.page_size = page_size;
        }
        if let Some(base_url) = &self.base_url {
            settings.base_url = base_url.clone();
        }
        settings
    }
}

fn parse_category(s: &str) -> Result<Category, String> {
    s.parse::<Category>().map_err(|e| {
        let known = Category::ALL.map(|c| c.as_str()).join(", ");
        format!("{e} (expected one of: {known})")
    })
}
