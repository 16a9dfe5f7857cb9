//! Static configuration: endpoint, country, page size and credential.
//!
//! Settings come from three layers, later layers winning:
//! 1. Built-in defaults ([`Settings::default`])
//! 2. An optional YAML file (see [`load_settings`])
//! 3. Command-line flags and environment variables (applied in `main`)
//!
//! # Example `config.yaml`
//!
//! ```yaml
//! api_key: 0123456789abcdef
//! country: gb
//! page_size: 12
//! ```

use serde::Deserialize;
use std::error::Error;
use std::path::Path;
use tracing::{info, instrument};

/// Default top-headlines endpoint.
pub const DEFAULT_BASE_URL: &str = "https://newsapi.org/v2/top-headlines";

/// Default two-letter country code.
pub const DEFAULT_COUNTRY: &str = "us";

/// Default number of articles requested per category.
pub const DEFAULT_PAGE_SIZE: u32 = 21;

/// Credential value shipped in sample configs; treated as absent.
pub const PLACEHOLDER_API_KEY: &str = "YOUR_API_KEY";

/// Resolved configuration for the headline pipeline.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub base_url: String,
    pub country: String,
    pub page_size: u32,
    pub api_key: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            country: DEFAULT_COUNTRY.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            api_key: None,
        }
    }
}

impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("base_url", &self.base_url)
            .field("country", &self.country)
            .field("page_size", &self.page_size)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl Settings {
    /// Whether the configured credential looks usable.
    ///
    /// An absent key, an empty key and [`PLACEHOLDER_API_KEY`] all count as
    /// missing.
    pub fn has_credential(&self) -> bool {
        usable_credential(self.api_key.as_deref()).is_some()
    }
}

/// Return the credential if it is present and not a known placeholder.
pub fn usable_credential(key: Option<&str>) -> Option<&str> {
    key.map(str::trim)
        .filter(|k| !k.is_empty() && *k != PLACEHOLDER_API_KEY)
}

/// Load settings from a YAML file, or the defaults when `path` is `None`.
///
/// Fields missing from the file keep their default values.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not valid YAML.
#[instrument(level = "info", skip_all)]
pub async fn load_settings(path: Option<&Path>) -> Result<Settings, Box<dyn Error>> {
    let Some(path) = path else {
        return Ok(Settings::default());
    };

    let raw = tokio::fs::read_to_string(path).await?;
    let settings: Settings = serde_yaml::from_str(&raw)?;
    info!(path = %path.display(), country = %settings.country, page_size = settings.page_size, "Loaded configuration");
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.base_url, DEFAULT_BASE_URL);
        assert_eq!(settings.country, "us");
        assert_eq!(settings.page_size, 21);
        assert!(!settings.has_credential());
    }

    #[test]
    fn test_usable_credential() {
        assert_eq!(usable_credential(Some("abc123")), Some("abc123"));
        assert_eq!(usable_credential(Some("  abc123 ")), Some("abc123"));
        assert_eq!(usable_credential(Some("")), None);
        assert_eq!(usable_credential(Some(PLACEHOLDER_API_KEY)), None);
        assert_eq!(usable_credential(None), None);
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let settings = Settings {
            api_key: Some("super-secret".to_string()),
            ..Settings::default()
        };
        let debug = format!("{settings:?}");
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("<redacted>"));
    }

    #[tokio::test]
    async fn test_load_settings_without_path() {
        let settings = load_settings(None).await.unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[tokio::test]
    async fn test_load_settings_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "api_key: from-file\ncountry: gb").unwrap();

        let settings = load_settings(Some(file.path())).await.unwrap();
        assert_eq!(settings.api_key.as_deref(), Some("from-file"));
        assert_eq!(settings.country, "gb");
        assert_eq!(settings.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(settings.base_url, DEFAULT_BASE_URL);
    }

    #[tokio::test]
    async fn test_load_settings_invalid_yaml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "page_size: [not, a, number]").unwrap();
        assert!(load_settings(Some(file.path())).await.is_err());
    }

    #[tokio::test]
    async fn test_load_settings_missing_file() {
        let path = Path::new("/definitely/not/here/config.yaml");
        assert!(load_settings(Some(path)).await.is_err());
    }
}
