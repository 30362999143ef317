//! Application configuration structures.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Source document and readability proxy settings
    #[serde(default)]
    pub source: SourceConfig,

    /// HTTP and refresh behavior settings
    #[serde(default)]
    pub fetch: FetchConfig,

    /// Text parsing settings
    #[serde(default)]
    pub parser: ParserConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.source.document_url.trim().is_empty() {
            return Err(AppError::validation("source.document_url is empty"));
        }
        url::Url::parse(&self.source.document_url)?;
        if self.source.proxy_prefix.trim().is_empty() {
            return Err(AppError::validation("source.proxy_prefix is empty"));
        }
        if self.fetch.user_agent.trim().is_empty() {
            return Err(AppError::validation("fetch.user_agent is empty"));
        }
        if self.fetch.timeout_secs == 0 {
            return Err(AppError::validation("fetch.timeout_secs must be > 0"));
        }
        if self.parser.marker.trim().is_empty() {
            return Err(AppError::validation("parser.marker is empty"));
        }
        if self.parser.price_unit.trim().is_empty() {
            return Err(AppError::validation("parser.price_unit is empty"));
        }
        Ok(())
    }
}

/// Source document and readability proxy settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// URL of the publicly published document holding the menu
    #[serde(default = "defaults::document_url")]
    pub document_url: String,

    /// Readability proxy prefix; the schemeless document URL is appended
    #[serde(default = "defaults::proxy_prefix")]
    pub proxy_prefix: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            document_url: defaults::document_url(),
            proxy_prefix: defaults::proxy_prefix(),
        }
    }
}

/// HTTP client and refresh behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Hard timeout per fetch attempt, in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Maximum follow-up fetch attempts after an unchanged response
    #[serde(default = "defaults::repoll_attempts")]
    pub repoll_attempts: u32,

    /// Delay between repoll attempts in milliseconds
    #[serde(default = "defaults::repoll_delay")]
    pub repoll_delay_ms: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
            repoll_attempts: defaults::repoll_attempts(),
            repoll_delay_ms: defaults::repoll_delay(),
        }
    }
}

/// Text parsing settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParserConfig {
    /// Boilerplate marker; everything up to and including it is discarded
    #[serde(default = "defaults::marker")]
    pub marker: String,

    /// Title used when items appear before any section header
    #[serde(default = "defaults::fallback_section")]
    pub fallback_section: String,

    /// Currency unit token that terminates a trailing price
    #[serde(default = "defaults::price_unit")]
    pub price_unit: String,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            marker: defaults::marker(),
            fallback_section: defaults::fallback_section(),
            price_unit: defaults::price_unit(),
        }
    }
}

mod defaults {
    // Source defaults
    pub fn document_url() -> String {
        "https://docs.google.com/document/d/e/2PACX-1vTbHt9TdJ771nkiO6r2TJ1AIvTRg7-8iBnb-MHJSCo19uhb1TCoJx5SMtRb0nzkBXEPqRtfO-a9uX2d/pub".into()
    }
    pub fn proxy_prefix() -> String {
        // The proxy expects the target with its protocol after the prefix
        "https://r.jina.ai/http://".into()
    }

    // Fetch defaults
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; menu-sync/0.1)".into()
    }
    pub fn timeout() -> u64 {
        7
    }
    pub fn repoll_attempts() -> u32 {
        3
    }
    pub fn repoll_delay() -> u64 {
        3000
    }

    // Parser defaults
    pub fn marker() -> String {
        "Markdown Content:".into()
    }
    pub fn fallback_section() -> String {
        "Meny".into()
    }
    pub fn price_unit() -> String {
        "kr".into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_default_config_ok() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_user_agent() {
        let mut config = Config::default();
        config.fetch.user_agent = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_timeout() {
        let mut config = Config::default();
        config.fetch.timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_bad_document_url() {
        let mut config = Config::default();
        config.source.document_url = "not a url".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
            [fetch]
            timeout_secs = 5
            "#,
        )
        .unwrap();

        assert_eq!(config.fetch.timeout_secs, 5);
        assert_eq!(config.fetch.repoll_attempts, 3);
        assert_eq!(config.parser.marker, "Markdown Content:");
        assert_eq!(config.parser.fallback_section, "Meny");
    }
}
