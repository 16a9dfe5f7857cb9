//! Fetching and validating top headlines from the news provider.
//!
//! This module performs the single network call of the pipeline and turns
//! every possible result into a [`FetchOutcome`]:
//!
//! - **Transport failure** (connection error, non-2xx status): the body is
//!   parsed as a structured error when possible, otherwise a generic
//!   `"HTTP error! Status: N"` message is used
//! - **API failure** (2xx with `status != "ok"`): the provider's message is
//!   used, or a generic fallback
//! - **Success**: the article list goes through the projector; an empty or
//!   missing list is a successful outcome with zero cards
//!
//! Nothing escapes [`NewsClient::fetch_headlines`] as an error or panic.
//!
//! # Failure reasons
//!
//! Each failure is tagged with a [`FailureReason`] resolved, in order, from
//! the provider's structured `code`, the HTTP status, and finally pattern
//! matching on the message text.

use crate::models::{CardViewModel, Category, HeadlinesResponse, RawArticle};
use crate::projector::project_articles;
use crate::request::FetchRequest;
use crate::utils::truncate_for_log;
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::StatusCode;
use std::time::Instant;
use tracing::{debug, info, instrument, warn};

/// Fallback message when the provider reports a non-ok status without text.
pub const API_STATUS_NOT_OK: &str = "API response status was not \"ok\".";

static RATE_LIMIT_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)rate\s*limit|too\s+many\s+requests").expect("valid regex"));

static INVALID_KEY_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)api\s*key\s*(is\s+)?(invalid|missing|disabled|incorrect)|invalid\s+api\s*key")
        .expect("valid regex")
});

/// Raw cause of a failed fetch.
///
/// The `Display` output is the underlying message, shown to users as the
/// diagnostic detail.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    /// The request never produced an HTTP response.
    #[error("{0}")]
    Network(String),
    /// The provider answered with a non-success status code.
    #[error("{message}")]
    Http {
        status: u16,
        code: Option<String>,
        message: String,
    },
    /// The provider answered 2xx but reported `status != "ok"`.
    #[error("{message}")]
    Api {
        code: Option<String>,
        message: String,
    },
    /// A success response whose body was not the expected JSON.
    #[error("{0}")]
    Decode(String),
}

impl FetchError {
    /// Structured provider error code, when the body carried one.
    pub fn code(&self) -> Option<&str> {
        match self {
            FetchError::Http { code, .. } | FetchError::Api { code, .. } => code.as_deref(),
            _ => None,
        }
    }

    /// HTTP status of the response, when there was one.
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Why a fetch failed, as far as the user needs to know.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureReason {
    RateLimited,
    InvalidCredential,
    Other,
}

impl FailureReason {
    /// Classify a fetch error, preferring structured signals over text.
    pub fn classify(error: &FetchError) -> Self {
        match error.code() {
            Some("rateLimited" | "apiKeyExhausted") => return FailureReason::RateLimited,
            Some("apiKeyInvalid" | "apiKeyMissing" | "apiKeyDisabled") => {
                return FailureReason::InvalidCredential;
            }
            _ => {}
        }

        match error.status() {
            Some(429) => return FailureReason::RateLimited,
            Some(401) => return FailureReason::InvalidCredential,
            _ => {}
        }

        let text = error.to_string();
        if RATE_LIMIT_PATTERN.is_match(&text) {
            FailureReason::RateLimited
        } else if INVALID_KEY_PATTERN.is_match(&text) {
            FailureReason::InvalidCredential
        } else {
            FailureReason::Other
        }
    }

    fn hint(&self) -> Option<&'static str> {
        match self {
            FailureReason::RateLimited => {
                Some("Too many requests. Please wait a moment and try again (API Rate Limit Exceeded).")
            }
            FailureReason::InvalidCredential => {
                Some("Invalid API Key. Please check the key in your configuration.")
            }
            FailureReason::Other => None,
        }
    }
}

/// A failed fetch for one category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub category: Category,
    pub reason: FailureReason,
    pub error: FetchError,
}

impl Failure {
    pub fn new(category: Category, error: FetchError) -> Self {
        Self {
            category,
            reason: FailureReason::classify(&error),
            error,
        }
    }

    /// Friendly banner text with the raw cause appended for diagnostics.
    pub fn user_message(&self) -> String {
        let mut message = format!(
            "Oops! Couldn't fetch {} news. Please try again later.",
            self.category
        );
        if let Some(hint) = self.reason.hint() {
            message.push(' ');
            message.push_str(hint);
        }
        format!("{message} (Details: {})", self.error)
    }
}

/// Result of one pipeline run. Malformed articles never cause a failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Success(Vec<CardViewModel>),
    Failure(Failure),
}

/// HTTP client for the top-headlines endpoint.
///
/// No timeout is configured; a hung request stays pending.
#[derive(Debug, Clone, Default)]
pub struct NewsClient {
    http: reqwest::Client,
}

impl NewsClient {
    /// Create a client identifying itself with this crate's user agent.
    pub fn new() -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("headline_deck/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { http })
    }

    /// Wrap an existing `reqwest` client.
    pub fn with_client(http: reqwest::Client) -> Self {
        Self { http }
    }

    /// Fetch, validate and project one page of headlines.
    #[instrument(level = "info", skip_all, fields(category = %request.category))]
    pub async fn fetch_headlines(&self, request: &FetchRequest) -> FetchOutcome {
        let t0 = Instant::now();
        match self.fetch_articles(request).await {
            Ok(articles) => {
                let cards = project_articles(&articles);
                info!(
                    received = articles.len(),
                    cards = cards.len(),
                    elapsed_ms = t0.elapsed().as_millis() as u64,
                    "Fetched headlines"
                );
                FetchOutcome::Success(cards)
            }
            Err(error) => {
                let failure = Failure::new(request.category, error);
                warn!(
                    reason = ?failure.reason,
                    error = %failure.error,
                    elapsed_ms = t0.elapsed().as_millis() as u64,
                    "Headline fetch failed"
                );
                FetchOutcome::Failure(failure)
            }
        }
    }

    async fn fetch_articles(&self, request: &FetchRequest) -> Result<Vec<RawArticle>, FetchError> {
        debug!(endpoint = %request.endpoint(), ?request, "Sending headlines request");

        let response = self
            .http
            .get(request.url())
            .send()
            .await
            .map_err(|e| FetchError::Network(e.without_url().to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Network(e.without_url().to_string()))?;
        debug!(status = status.as_u16(), bytes = body.len(), "Received headlines response");

        interpret_response(status, &body)
    }
}

/// Validate a response and extract its article list.
///
/// Split out from the client so the status/body rules can be tested
/// without a server.
pub fn interpret_response(status: StatusCode, body: &str) -> Result<Vec<RawArticle>, FetchError> {
    if !status.is_success() {
        let (code, message) = match serde_json::from_str::<HeadlinesResponse>(body) {
            Ok(parsed) => {
                let message = parsed
                    .message
                    .filter(|m| !m.is_empty())
                    .unwrap_or_else(|| {
                        format!(
                            "Failed to fetch: {}",
                            status.canonical_reason().unwrap_or("Unknown status")
                        )
                    });
                (parsed.code, message)
            }
            Err(_) => {
                debug!(body = %truncate_for_log(body, 200), "Error body is not JSON");
                (None, format!("HTTP error! Status: {}", status.as_u16()))
            }
        };
        return Err(FetchError::Http {
            status: status.as_u16(),
            code,
            message,
        });
    }

    let parsed: HeadlinesResponse = serde_json::from_str(body).map_err(|e| {
        warn!(error = %e, body = %truncate_for_log(body, 200), "Response body is not valid JSON");
        FetchError::Decode(format!("Invalid response body: {e}"))
    })?;

    if parsed.status.as_deref() != Some("ok") {
        return Err(FetchError::Api {
            code: parsed.code,
            message: parsed
                .message
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| API_STATUS_NOT_OK.to_string()),
        });
    }

    let articles = parsed.articles.unwrap_or_default();
    debug!(
        total_results = ?parsed.total_results,
        received = articles.len(),
        "Validated headlines response"
    );
    Ok(articles)
}
