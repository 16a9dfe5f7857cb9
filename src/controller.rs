//! Current-category state and the presentation surface it drives.
//!
//! The [`CategoryController`] is the only code that changes the active
//! category. Every change hands back a [`PendingFetch`] carrying a
//! [`Ticket`]; when the fetch resolves, the outcome is applied through
//! [`CategoryController::apply`], which drops outcomes whose ticket has
//! been superseded by a newer selection.

use crate::api::FetchOutcome;
use crate::config::Settings;
use crate::models::{CardViewModel, Category};
use crate::request::{FetchRequest, RequestError, build_request};
use tracing::{debug, error, info};

/// Text shown in place of the category list when no credential is set.
pub const CATEGORIES_UNAVAILABLE: &str = "API Key required to load categories.";

/// Where the pipeline's results are displayed.
///
/// Implementations must not assume any ordering beyond what the controller
/// guarantees: loading is always shown before a fetch, and exactly one of
/// `render`, `show_empty` or `show_error` follows `hide_loading`.
pub trait Surface {
    fn show_loading(&mut self);
    fn hide_loading(&mut self);
    fn show_error(&mut self, message: &str);
    fn render(&mut self, category: Category, cards: &[CardViewModel]);
    fn show_empty(&mut self, category: Category);
    fn set_heading(&mut self, heading: &str);
    fn show_categories(&mut self, categories: &[Category], active: Category);
    fn mark_active(&mut self, category: Category);
    fn show_categories_unavailable(&mut self);
}

/// Message shown when a category has no articles.
pub fn empty_message(category: Category) -> String {
    format!("No articles found for the '{category}' category.")
}

/// Identifies which selection a fetch belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    pub category: Category,
    generation: u64,
}

/// A fetch the caller must run and report back via [`CategoryController::apply`].
#[derive(Debug)]
pub struct PendingFetch {
    pub ticket: Ticket,
    pub request: FetchRequest,
}

/// The single mutable "current category" cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryState {
    current: Category,
    generation: u64,
}

impl CategoryState {
    pub fn new(initial: Category) -> Self {
        Self {
            current: initial,
            generation: 0,
        }
    }

    pub fn current(&self) -> Category {
        self.current
    }

    /// Make `category` current and return the ticket for its fetch.
    fn select(&mut self, category: Category) -> Ticket {
        self.current = category;
        self.generation += 1;
        self.ticket()
    }

    fn ticket(&self) -> Ticket {
        Ticket {
            category: self.current,
            generation: self.generation,
        }
    }

    fn is_current(&self, ticket: &Ticket) -> bool {
        ticket.generation == self.generation && ticket.category == self.current
    }
}

/// Owns the category state and drives a [`Surface`].
#[derive(Debug)]
pub struct CategoryController<S> {
    settings: Settings,
    state: CategoryState,
    surface: S,
    disabled: bool,
}

impl<S: Surface> CategoryController<S> {
    pub fn new(settings: Settings, initial: Category, surface: S) -> Self {
        Self {
            settings,
            state: CategoryState::new(initial),
            surface,
            disabled: false,
        }
    }

    pub fn current_category(&self) -> Category {
        self.state.current()
    }

    /// True once a missing credential has made category switching inert.
    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    /// Set up the category list and request the initial category.
    ///
    /// Without a usable credential this shows the missing-key error, replaces
    /// the category list with a notice and returns `None`; no network call
    /// is ever attempted in that session.
    pub fn start(&mut self) -> Option<PendingFetch> {
        if !self.settings.has_credential() {
            self.disable(&RequestError::MissingCredential);
            return None;
        }

        let current = self.state.current();
        self.surface.show_categories(&Category::ALL, current);
        self.surface.set_heading(&current.heading());
        info!(category = %current, "Starting with initial category");
        self.begin_fetch(self.state.ticket())
    }

    /// Switch to the category named by `raw`.
    ///
    /// Returns `None` without touching the surface when `raw` is empty or
    /// unknown, names the current category, or the controller is disabled.
    pub fn select_category(&mut self, raw: &str) -> Option<PendingFetch> {
        if self.disabled {
            debug!(requested = raw, "Category switching disabled");
            return None;
        }

        let category = match raw.parse::<Category>() {
            Ok(category) => category,
            Err(e) => {
                debug!(error = %e, "Ignoring category selection");
                return None;
            }
        };
        if category == self.state.current() {
            debug!(%category, "Category already active");
            return None;
        }

        let ticket = self.state.select(category);
        self.surface.mark_active(category);
        self.surface.set_heading(&category.heading());
        info!(%category, "Category selected");
        self.begin_fetch(ticket)
    }

    fn begin_fetch(&mut self, ticket: Ticket) -> Option<PendingFetch> {
        self.surface.show_loading();
        match build_request(ticket.category, &self.settings) {
            Ok(request) => Some(PendingFetch { ticket, request }),
            Err(e) => {
                self.surface.hide_loading();
                if e == RequestError::MissingCredential {
                    self.disable(&e);
                } else {
                    error!(error = %e, "Could not build headlines request");
                    self.surface.show_error(&e.to_string());
                }
                None
            }
        }
    }

    fn disable(&mut self, e: &RequestError) {
        error!(error = %e, "Headline fetching disabled");
        self.disabled = true;
        self.surface.show_error(&e.to_string());
        self.surface.show_categories_unavailable();
    }

    /// Display a resolved fetch unless a newer selection superseded it.
    ///
    /// Returns whether the outcome was displayed.
    pub fn apply(&mut self, ticket: Ticket, outcome: FetchOutcome) -> bool {
        if !self.state.is_current(&ticket) {
            debug!(
                stale = %ticket.category,
                current = %self.state.current(),
                "Discarding stale outcome"
            );
            return false;
        }

        self.surface.hide_loading();
        match outcome {
            FetchOutcome::Success(cards) if cards.is_empty() => {
                info!(category = %ticket.category, "No articles returned");
                self.surface.show_empty(ticket.category);
            }
            FetchOutcome::Success(cards) => {
                self.surface.render(ticket.category, &cards);
            }
            FetchOutcome::Failure(failure) => {
                let message = failure.user_message();
                error!(category = %ticket.category, error = %failure.error, "News fetch error");
                self.surface.show_error(&message);
            }
        }
        true
    }
}

#[cfg(test)]
pub(crate) mod recording {
    use super::*;

    /// One observed surface call.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum Call {
        Loading,
        LoadingDone,
        Error(String),
        Render(Category, Vec<String>),
        Empty(Category),
        Heading(String),
        Categories(Category),
        Active(Category),
        CategoriesUnavailable,
    }

    /// Surface double that records every call in order.
    #[derive(Debug, Default)]
    pub struct RecordingSurface {
        pub calls: Vec<Call>,
    }

    impl RecordingSurface {
        pub fn last_render(&self) -> Option<(Category, Vec<String>)> {
            self.calls.iter().rev().find_map(|c| match c {
                Call::Render(category, titles) => Some((*category, titles.clone())),
                _ => None,
            })
        }
    }

    impl Surface for RecordingSurface {
        fn show_loading(&mut self) {
            self.calls.push(Call::Loading);
        }
        fn hide_loading(&mut self) {
            self.calls.push(Call::LoadingDone);
        }
        fn show_error(&mut self, message: &str) {
            self.calls.push(Call::Error(message.to_string()));
        }
        fn render(&mut self, category: Category, cards: &[CardViewModel]) {
            let titles = cards.iter().map(|c| c.title.clone()).collect();
            self.calls.push(Call::Render(category, titles));
        }
        fn show_empty(&mut self, category: Category) {
            self.calls.push(Call::Empty(category));
        }
        fn set_heading(&mut self, heading: &str) {
            self.calls.push(Call::Heading(heading.to_string()));
        }
        fn show_categories(&mut self, _categories: &[Category], active: Category) {
            self.calls.push(Call::Categories(active));
        }
        fn mark_active(&mut self, category: Category) {
            self.calls.push(Call::Active(category));
        }
        fn show_categories_unavailable(&mut self) {
            self.calls.push(Call::CategoriesUnavailable);
        }
    }
}
