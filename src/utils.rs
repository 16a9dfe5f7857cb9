//! Pure text formatting for card fields and log output.
//!
//! This module turns raw, untrusted field values into display-safe,
//! length-bounded text:
//! - Publication date formatting (`"Mar 15, 2024"`)
//! - Title and description truncation
//! - Label capitalization
//!
//! Every function here is total: malformed input produces a fallback string,
//! never a panic. All lengths are counted in characters, not bytes.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Marker appended to any truncated text.
pub const ELLIPSIS: &str = "...";

/// Maximum title length in characters before truncation.
pub const TITLE_LIMIT: usize = 80;

/// Maximum description length in characters before truncation.
pub const DESCRIPTION_LIMIT: usize = 120;

/// Shown when an article has no description.
pub const DESCRIPTION_PLACEHOLDER: &str = "Read the full article for details.";

/// Shown when an article has no publication date.
pub const DATE_UNAVAILABLE: &str = "Date unavailable";

/// Shown when a publication date cannot be parsed.
pub const INVALID_DATE: &str = "Invalid Date";

/// Format an ISO 8601 timestamp as a short US-style date.
///
/// # Returns
///
/// - `"Date unavailable"` for `None`, empty or blank input
/// - `"Invalid Date"` if the value does not parse
/// - Otherwise a date like `"Mar 15, 2024"` (calendar day in UTC)
///
/// # Examples
///
/// ```
/// use headline_deck::utils::format_date;
/// assert_eq!(format_date(Some("2024-03-15T12:00:00Z")), "Mar 15, 2024");
/// assert_eq!(format_date(None), "Date unavailable");
/// ```
pub fn format_date(iso: Option<&str>) -> String {
    let Some(raw) = iso.map(str::trim).filter(|s| !s.is_empty()) else {
        return DATE_UNAVAILABLE.to_string();
    };

    match parse_publication_date(raw) {
        Some(date) => date.format("%b %-d, %Y").to_string(),
        None => {
            tracing::debug!(value = %truncate_for_log(raw, 64), "Unparsable publication date");
            INVALID_DATE.to_string()
        }
    }
}

fn parse_publication_date(raw: &str) -> Option<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw).or_else(|_| DateTime::parse_from_rfc2822(raw)) {
        return Some(dt.with_timezone(&Utc).date_naive());
    }
    // Providers occasionally drop the offset; treat those as UTC.
    ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|dt| dt.date())
        .or_else(|| NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok())
}

/// Truncate a title to [`TITLE_LIMIT`] characters.
///
/// Titles longer than the limit are cut at exactly 80 characters and get
/// [`ELLIPSIS`] appended; shorter titles are returned unchanged.
pub fn truncate_title(title: &str) -> String {
    if title.chars().count() <= TITLE_LIMIT {
        return title.to_string();
    }
    let mut out: String = title.chars().take(TITLE_LIMIT).collect();
    out.push_str(ELLIPSIS);
    out
}

/// Truncate a description at a word boundary.
///
/// - Empty input yields [`DESCRIPTION_PLACEHOLDER`]
/// - Input of at most [`DESCRIPTION_LIMIT`] characters is returned unchanged
/// - Longer input is cut at the last whitespace at or before position 120,
///   or hard-cut at 120 when there is none, and gets [`ELLIPSIS`] appended
pub fn truncate_description(description: &str) -> String {
    if description.is_empty() {
        return DESCRIPTION_PLACEHOLDER.to_string();
    }

    let chars: Vec<char> = description.chars().collect();
    if chars.len() <= DESCRIPTION_LIMIT {
        return description.to_string();
    }

    let cut = chars[..=DESCRIPTION_LIMIT]
        .iter()
        .rposition(|c| c.is_whitespace())
        .unwrap_or(DESCRIPTION_LIMIT);

    let mut out: String = chars[..cut].iter().collect();
    out.push_str(ELLIPSIS);
    out
}

/// Capitalize the first character of a string.
///
/// Used for category labels (e.g., "technology" -> "Technology").
///
/// # Examples
///
/// ```
/// use headline_deck::utils::capitalize;
/// assert_eq!(capitalize("hello"), "Hello");
/// assert_eq!(capitalize(""), "");
/// ```
pub fn capitalize(s: &str) -> String {
    let mut c = s.chars();
    match c.next() {
        None => String::new(),
        Some(f) => f.to_uppercase().collect::<String>() + c.as_str(),
    }
}

/// Truncate a string for logging purposes.
///
/// Long strings are truncated to at most `max` bytes (rounded down to a
/// character boundary) with an ellipsis and byte count indicator appended.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(truncate_for_log("short", 100), "short");
/// assert_eq!(truncate_for_log("a".repeat(500), 10), "aaaaaaaaaa…(+490 bytes)");
/// ```
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}…(+{} bytes)", &s[..end], s.len() - end)
}
