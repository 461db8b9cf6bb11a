#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::domain::model::ApiToken;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_base_url, validate_range, validate_required_field, Validate};

pub const OURA_API_KEY_ENV: &str = "OURA_API_KEY";
pub const DEFAULT_BASE_URL: &str = "https://api.ouraring.com";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
pub const MAX_TIMEOUT_SECONDS: u64 = 300;

/// Connection settings for the Oura API, resolved once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OuraConfig {
    pub api_key: Option<ApiToken>,
    pub base_url: String,
    pub timeout_seconds: u64,
}

impl Default for OuraConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }
}

impl OuraConfig {
    pub fn new(api_key: Option<ApiToken>) -> Self {
        Self {
            api_key,
            ..Self::default()
        }
    }

    /// Reads `OURA_API_KEY`; a missing or blank value leaves the key unset.
    pub fn from_env() -> Self {
        Self::new(api_key_from_env())
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout_seconds(mut self, timeout_seconds: u64) -> Self {
        self.timeout_seconds = timeout_seconds;
        self
    }

    pub fn require_api_key(&self) -> Result<&ApiToken> {
        validate_required_field(OURA_API_KEY_ENV, &self.api_key)
    }
}

pub(crate) fn api_key_from_env() -> Option<ApiToken> {
    std::env::var(OURA_API_KEY_ENV).ok().and_then(ApiToken::new)
}

impl ConfigProvider for OuraConfig {
    fn api_key(&self) -> Option<&ApiToken> {
        self.api_key.as_ref()
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn timeout_seconds(&self) -> u64 {
        self.timeout_seconds
    }
}

impl Validate for OuraConfig {
    fn validate(&self) -> Result<()> {
        validate_base_url("base_url", &self.base_url)?;
        validate_range("timeout_seconds", self.timeout_seconds, 1, MAX_TIMEOUT_SECONDS)?;
        self.require_api_key()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::OuraError;

    #[test]
    fn test_defaults() {
        let config = OuraConfig::default();
        assert_eq!(config.base_url, "https://api.ouraring.com");
        assert_eq!(config.timeout_seconds, 30);
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_from_env_reads_key_once() {
        std::env::set_var(OURA_API_KEY_ENV, "env-token");
        let config = OuraConfig::from_env();
        std::env::remove_var(OURA_API_KEY_ENV);

        assert_eq!(config.api_key.unwrap().expose(), "env-token");
    }

    #[test]
    fn test_validation_requires_api_key() {
        let err = OuraConfig::default().validate().unwrap_err();
        assert!(matches!(err, OuraError::MissingConfigError { ref field } if field == "OURA_API_KEY"));
    }

    #[test]
    fn test_validation_checks_url_and_timeout() {
        let config = OuraConfig::new(ApiToken::new("token"));
        assert!(config.validate().is_ok());
        assert!(config.clone().with_base_url("not a url").validate().is_err());
        assert!(config
            .clone()
            .with_base_url("https://api.ouraring.com?x=1")
            .validate()
            .is_err());
        assert!(config.clone().with_timeout_seconds(0).validate().is_err());
        assert!(config.with_timeout_seconds(301).validate().is_err());
    }
}
