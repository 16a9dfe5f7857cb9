//! Building the top-headlines request for a category.

use crate::config::{Settings, usable_credential};
use crate::models::Category;
use std::fmt;
use url::Url;

/// Reasons a request cannot be built.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RequestError {
    /// The credential is absent or still the placeholder value.
    #[error("API Key is missing! Please add your NewsAPI.org key to the configuration.")]
    MissingCredential,
    /// The configured endpoint is not a valid absolute URL.
    #[error("invalid endpoint URL {url:?}: {reason}")]
    InvalidEndpoint { url: String, reason: String },
}

/// Everything needed to fetch one page of headlines.
///
/// Built fresh for every fetch and never mutated afterwards.
#[derive(Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub category: Category,
    pub country: String,
    pub page_size: u32,
    credential: String,
    endpoint: Url,
}

impl FetchRequest {
    /// The full GET target including query parameters.
    pub fn url(&self) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("country", &self.country)
            .append_pair("category", self.category.as_str())
            .append_pair("pageSize", &self.page_size.to_string())
            .append_pair("apiKey", &self.credential);
        url
    }

    /// The endpoint without query parameters, safe to log.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

impl fmt::Debug for FetchRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FetchRequest")
            .field("category", &self.category)
            .field("country", &self.country)
            .field("page_size", &self.page_size)
            .field("endpoint", &self.endpoint.as_str())
            .finish_non_exhaustive()
    }
}

/// Build the request for `category` from the static settings.
///
/// Fails fast with [`RequestError::MissingCredential`] instead of building a
/// request that the provider would reject.
pub fn build_request(category: Category, settings: &Settings) -> Result<FetchRequest, RequestError> {
    let credential = usable_credential(settings.api_key.as_deref())
        .ok_or(RequestError::MissingCredential)?
        .to_string();

    let endpoint = Url::parse(&settings.base_url).map_err(|e| RequestError::InvalidEndpoint {
        url: settings.base_url.clone(),
        reason: e.to_string(),
    })?;

    Ok(FetchRequest {
        category,
        country: settings.country.clone(),
        page_size: settings.page_size,
        credential,
        endpoint,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PLACEHOLDER_API_KEY;

    fn settings_with_key(key: Option<&str>) -> Settings {
        Settings {
            api_key: key.map(str::to_string),
            ..Settings::default()
        }
    }

    #[test]
    fn test_build_request_query_parameters() {
        let req = build_request(Category::Technology, &settings_with_key(Some("k3y"))).unwrap();
        let url = req.url();

        assert_eq!(url.host_str(), Some("newsapi.org"));
        assert_eq!(url.path(), "/v2/top-headlines");
        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("country".to_string(), "us".to_string()),
                ("category".to_string(), "technology".to_string()),
                ("pageSize".to_string(), "21".to_string()),
                ("apiKey".to_string(), "k3y".to_string()),
            ]
        );
    }

    #[test]
    fn test_build_request_missing_credential() {
        assert_eq!(
            build_request(Category::General, &settings_with_key(None)),
            Err(RequestError::MissingCredential)
        );
        assert_eq!(
            build_request(Category::General, &settings_with_key(Some(""))),
            Err(RequestError::MissingCredential)
        );
        assert_eq!(
            build_request(Category::General, &settings_with_key(Some(PLACEHOLDER_API_KEY))),
            Err(RequestError::MissingCredential)
        );
    }

    #[test]
    fn test_build_request_invalid_endpoint() {
        let settings = Settings {
            base_url: "not a url".to_string(),
            ..settings_with_key(Some("k3y"))
        };
        assert!(matches!(
            build_request(Category::General, &settings),
            Err(RequestError::InvalidEndpoint { .. })
        ));
    }

    #[test]
    fn test_debug_hides_credential() {
        let req = build_request(Category::Sports, &settings_with_key(Some("hidden-key"))).unwrap();
        let debug = format!("{req:?}");
        assert!(debug.contains("Sports"));
        assert!(!debug.contains("hidden-key"));
    }
}
