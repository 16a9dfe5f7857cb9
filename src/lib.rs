//! # Headline Deck
//!
//! Fetches top-headline articles for a selected news category and turns
//! them into bounded, display-ready cards.
//!
//! ## Pipeline
//!
//! 1. **Request**: [`request::build_request`] turns a category plus static
//!    [`config::Settings`] into a [`request::FetchRequest`]
//! 2. **Fetch & validate**: [`api::NewsClient::fetch_headlines`] performs the
//!    network call and folds every failure into a [`api::FetchOutcome`]
//! 3. **Project**: [`projector::project_articles`] maps raw articles to
//!    [`models::CardViewModel`]s, silently dropping malformed entries
//! 4. **Display**: [`controller::CategoryController`] owns the current
//!    category and pushes outcomes to a [`controller::Surface`], ignoring
//!    stale ones
//!
//! [`session::Session`] runs the fetches concurrently on tokio, and
//! [`outputs`] provides a terminal surface with text, Markdown and JSON
//! card layouts.

pub mod api;
pub mod config;
pub mod controller;
pub mod models;
pub mod outputs;
pub mod projector;
pub mod request;
pub mod session;
pub mod utils;
