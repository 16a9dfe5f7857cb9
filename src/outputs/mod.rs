//! Rendering of cards for the terminal front end.
//!
//! Card rendering is a pure mapping from [`CardViewModel`](crate::models::CardViewModel)
//! to text, one submodule per format:
//!
//! - [`text`]: Plain, indented card blocks for reading in a terminal
//! - [`markdown`]: Markdown sections with linked titles and images
//! - [`json`]: Machine-readable pages for piping into other tools
//!
//! [`terminal::TerminalSurface`] ties a format to a writer and implements
//! the pipeline's [`Surface`](crate::controller::Surface).

pub mod json;
pub mod markdown;
pub mod terminal;
pub mod text;

/// How cards are written to the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Markdown,
    Json,
}
