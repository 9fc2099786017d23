//! Service settings loaded via OrthoConfig.
//!
//! Values come from `STOREFRONT_*` environment variables, configuration
//! files, or command-line flags. Session cookie settings are read separately
//! by [`crate::inbound::http::session_config`].

use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
const DEFAULT_USER_AGENT: &str = "storefront-account/0.1";

/// A configured value that cannot be used.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// `bind_addr` is not a socket address.
    #[error("invalid bind address '{value}': {source}")]
    BindAddr {
        /// Configured value.
        value: String,
        /// Parser diagnostic.
        #[source]
        source: std::net::AddrParseError,
    },
    /// A URL setting does not parse.
    #[error("invalid URL for {setting} '{value}': {source}")]
    Url {
        /// Name of the offending setting.
        setting: &'static str,
        /// Configured value.
        value: String,
        /// Parser diagnostic.
        #[source]
        source: url::ParseError,
    },
    /// `request_timeout_secs` is zero.
    #[error("request timeout must be at least one second")]
    ZeroTimeout,
}

/// Storefront account service settings.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "STOREFRONT")]
pub struct StorefrontSettings {
    /// Socket address the HTTP server binds to.
    pub bind_addr: Option<String>,
    /// Customer Account GraphQL endpoint. Unset uses the in-process fixture.
    pub customer_api_url: Option<String>,
    /// Hosted customer login page.
    pub login_url: Option<String>,
    /// Upstream request timeout in seconds.
    pub request_timeout_secs: Option<u64>,
    /// `User-Agent` sent to the Customer Account API.
    pub user_agent: Option<String>,
}

impl StorefrontSettings {
    /// Configured bind address, or `0.0.0.0:8080`.
    ///
    /// # Errors
    /// Returns [`SettingsError::BindAddr`] when the value does not parse.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value.parse().map_err(|source| SettingsError::BindAddr {
            value: value.to_owned(),
            source,
        })
    }

    /// Customer Account endpoint, if configured.
    ///
    /// # Errors
    /// Returns [`SettingsError::Url`] for a malformed URL.
    pub fn customer_api_url(&self) -> Result<Option<Url>, SettingsError> {
        parse_url("customer_api_url", self.customer_api_url.as_deref())
    }

    /// Hosted login page, if configured.
    ///
    /// # Errors
    /// Returns [`SettingsError::Url`] for a malformed URL.
    pub fn login_url(&self) -> Result<Option<Url>, SettingsError> {
        parse_url("login_url", self.login_url.as_deref())
    }

    /// Upstream request timeout, defaulting to ten seconds.
    ///
    /// # Errors
    /// Returns [`SettingsError::ZeroTimeout`] when configured as zero.
    pub fn request_timeout(&self) -> Result<Duration, SettingsError> {
        match self
            .request_timeout_secs
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS)
        {
            0 => Err(SettingsError::ZeroTimeout),
            secs => Ok(Duration::from_secs(secs)),
        }
    }

    /// `User-Agent` for upstream calls; blank values use the default.
    #[must_use]
    pub fn user_agent(&self) -> &str {
        self.user_agent
            .as_deref()
            .filter(|agent| !agent.trim().is_empty())
            .unwrap_or(DEFAULT_USER_AGENT)
    }
}

fn parse_url(setting: &'static str, value: Option<&str>) -> Result<Option<Url>, SettingsError> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(|value| {
            Url::parse(value).map_err(|source| SettingsError::Url {
                setting,
                value: value.to_owned(),
                source,
            })
        })
        .transpose()
}
