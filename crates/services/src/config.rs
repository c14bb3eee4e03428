use std::env;

use url::Url;

use crate::error::ApiError;

pub const DEFAULT_API_URL: &str = "http://localhost:8001/api";

/// Where the remote API lives.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiConfig {
    base_url: Url,
}

impl ApiConfig {
    /// Build a config from a base URL such as `https://example.com/api`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::InvalidBaseUrl` if the URL does not parse or is not http(s).
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let trimmed = base_url.trim().trim_end_matches('/');
        let parsed =
            Url::parse(trimmed).map_err(|_| ApiError::InvalidBaseUrl(trimmed.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ApiError::InvalidBaseUrl(trimmed.to_string()));
        }
        Ok(Self { base_url: parsed })
    }

    /// Read `PREP_API_URL`, falling back to the local development server.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::InvalidBaseUrl` if the configured URL is invalid.
    pub fn from_env() -> Result<Self, ApiError> {
        match env::var("PREP_API_URL") {
            Ok(raw) if !raw.trim().is_empty() => Self::new(&raw),
            _ => Self::new(DEFAULT_API_URL),
        }
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Absolute URL for an API path like `/auth/login`.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_without_double_slashes() {
        let config = ApiConfig::new("https://prep.example.com/api/").unwrap();
        assert_eq!(
            config.endpoint("/auth/login"),
            "https://prep.example.com/api/auth/login"
        );
        assert_eq!(
            config.endpoint("readiness"),
            "https://prep.example.com/api/readiness"
        );
    }

    #[test]
    fn rejects_non_http_urls() {
        assert!(ApiConfig::new("ftp://example.com").is_err());
        assert!(ApiConfig::new("not a url").is_err());
    }

    #[test]
    fn default_url_is_valid() {
        assert!(ApiConfig::new(DEFAULT_API_URL).is_ok());
    }
}
