//! Issuer configuration.
//!
//! `IssuerConfig` holds the endpoint, audience, extra scopes and HTTP
//! settings of an [`AccessTokenIssuer`](crate::AccessTokenIssuer). It can be
//! built in code through [`IssuerConfigBuilder`] or deserialized from a
//! config file (durations are expressed in seconds).

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::defaults;
use crate::error::AuthError;

/// Issuer configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IssuerConfig {
    /// Token endpoint the assertion is posted to.
    pub token_endpoint: String,
    /// `aud` claim of the assertion.
    pub audience: String,
    /// Scopes appended after the default scope list.
    pub additional_scopes: Vec<String>,
    /// Request timeout
    #[serde(with = "duration_option_serde")]
    pub timeout: Option<Duration>,
    /// Connection timeout
    #[serde(with = "duration_option_serde")]
    pub connect_timeout: Option<Duration>,
    /// User agent
    pub user_agent: Option<String>,
}

impl Default for IssuerConfig {
    fn default() -> Self {
        Self {
            token_endpoint: defaults::oauth::TOKEN_ENDPOINT.to_string(),
            audience: defaults::oauth::AUDIENCE.to_string(),
            additional_scopes: Vec::new(),
            timeout: Some(defaults::http::REQUEST_TIMEOUT),
            connect_timeout: Some(defaults::http::CONNECT_TIMEOUT),
            user_agent: Some(defaults::http::USER_AGENT.to_string()),
        }
    }
}

impl IssuerConfig {
    /// Returns a builder for constructing `IssuerConfig`
    pub fn builder() -> IssuerConfigBuilder {
        IssuerConfigBuilder::new()
    }

    /// The space-separated `scope` claim: defaults first, then additional
    /// scopes in order, skipping blanks and duplicates.
    pub fn scope_string(&self) -> String {
        let mut scopes: Vec<&str> = defaults::oauth::DEFAULT_SCOPES.to_vec();
        for extra in &self.additional_scopes {
            let extra = extra.trim();
            if !extra.is_empty() && !scopes.contains(&extra) {
                scopes.push(extra);
            }
        }
        scopes.join(" ")
    }

    /// Parsed token endpoint URL.
    pub fn token_endpoint_url(&self) -> Result<reqwest::Url, AuthError> {
        reqwest::Url::parse(&self.token_endpoint).map_err(|e| {
            AuthError::Configuration(format!(
                "Invalid token endpoint '{}': {e}",
                self.token_endpoint
            ))
        })
    }

    /// Build an HTTP client from this configuration.
    ///
    /// A request timeout is always applied; `None` falls back to the default.
    pub fn build_http_client(&self) -> Result<reqwest::Client, AuthError> {
        let mut builder = reqwest::Client::builder()
            .timeout(self.timeout.unwrap_or(defaults::http::REQUEST_TIMEOUT));

        if let Some(connect_timeout) = self.connect_timeout {
            builder = builder.connect_timeout(connect_timeout);
        }

        if let Some(user_agent) = &self.user_agent {
            builder = builder.user_agent(user_agent);
        }

        builder
            .build()
            .map_err(|e| AuthError::Configuration(format!("Failed to create HTTP client: {e}")))
    }
}

/// Split a comma-separated scope list, dropping empty entries.
pub fn parse_scope_list(csv: &str) -> Vec<String> {
    csv.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Builder for `IssuerConfig`
#[derive(Debug, Clone, Default)]
pub struct IssuerConfigBuilder {
    token_endpoint: Option<String>,
    audience: Option<String>,
    additional_scopes: Vec<String>,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl IssuerConfigBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self::default()
    }

    pub fn token_endpoint<S: Into<String>>(mut self, endpoint: S) -> Self {
        self.token_endpoint = Some(endpoint.into());
        self
    }
    pub fn audience<S: Into<String>>(mut self, audience: S) -> Self {
        self.audience = Some(audience.into());
        self
    }
    pub fn scope<S: Into<String>>(mut self, scope: S) -> Self {
        self.additional_scopes.push(scope.into());
        self
    }
    pub fn scopes<I, S>(mut self, scopes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.additional_scopes
            .extend(scopes.into_iter().map(Into::into));
        self
    }
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
    pub fn connect_timeout(mut self, connect_timeout: Duration) -> Self {
        self.connect_timeout = Some(connect_timeout);
        self
    }
    pub fn user_agent<S: Into<String>>(mut self, user_agent: S) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Build the configuration
    pub fn build(self) -> IssuerConfig {
        let defaults = IssuerConfig::default();
        IssuerConfig {
            token_endpoint: self.token_endpoint.unwrap_or(defaults.token_endpoint),
            audience: self.audience.unwrap_or(defaults.audience),
            additional_scopes: self.additional_scopes,
            timeout: self.timeout.or(defaults.timeout),
            connect_timeout: self.connect_timeout.or(defaults.connect_timeout),
            user_agent: self.user_agent.or(defaults.user_agent),
        }
    }
}

// Helper module for Duration serialization
mod duration_option_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Option<Duration>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match duration {
            Some(d) => d.as_secs().serialize(serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Duration>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs: Option<u64> = Option::deserialize(deserializer)?;
        Ok(secs.map(Duration::from_secs))
    }
}
