//! Error Handling Module
//!
//! `AuthError` covers every way the issuing pipeline can fail. Its `Display`
//! output is the caller-facing failure reason, so it never carries key
//! material, signing input, or signatures.
//!
//! # Example
//!
//! ```rust,ignore
//! use gcp_token_issuer::AuthError;
//!
//! let error = AuthError::network("connection refused");
//! assert_eq!(error.to_string(), "network error: connection refused");
//! assert!(error.is_retryable());
//! ```

use thiserror::Error;

/// Errors raised while building, signing or exchanging an assertion.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    /// The service-account email is empty or not a syntactically valid address.
    #[error("Invalid Client Email")]
    InvalidEmailFormat,

    /// The private key is empty or does not parse as an RSA private key.
    #[error("Invalid Private Key")]
    InvalidPrivateKeyFormat,

    /// Header or claims failed to serialize.
    #[error("claim serialization failed: {0}")]
    ClaimSerialization(String),

    /// The RSA signing operation failed.
    #[error("signing failed: {0}")]
    SigningFailure(String),

    /// Input was not valid base64url.
    #[error("decode error: {0}")]
    Decode(String),

    /// The local clock reads earlier than any plausible real time.
    #[error("time was not set or not valid")]
    ClockNotSet { now: i64 },

    /// Transport failure talking to the token endpoint (includes timeouts).
    #[error("network error: {0}")]
    Network(String),

    /// The token endpoint answered with an error payload.
    #[error("{message}")]
    TokenEndpoint { message: String },

    /// The token endpoint answered with something that is neither a token nor an error.
    #[error("unexpected response format")]
    UnexpectedResponseFormat,

    /// The caller cancelled the request.
    #[error("cancelled")]
    Cancelled,

    /// Invalid issuer or HTTP client configuration.
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl AuthError {
    /// Create a network error
    pub fn network(detail: impl Into<String>) -> Self {
        Self::Network(detail.into())
    }

    /// Create a token endpoint error
    pub fn token_endpoint(message: impl Into<String>) -> Self {
        Self::TokenEndpoint {
            message: message.into(),
        }
    }

    /// Whether repeating the same call may succeed.
    ///
    /// Only transport failures qualify; the crate itself never retries.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Network(_))
    }

    /// The failure reason handed to callers.
    pub fn reason(&self) -> String {
        self.to_string()
    }
}

impl From<serde_json::Error> for AuthError {
    fn from(err: serde_json::Error) -> Self {
        Self::ClaimSerialization(err.to_string())
    }
}

impl From<reqwest::Error> for AuthError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            return Self::Network("request timed out".to_string());
        }
        // The request URL is not secret, but strip it to keep reasons short.
        Self::Network(error_chain(&err.without_url()))
    }
}

/// Join an error and its `source()` chain into one `a: b: c` detail string.
///
/// Causes whose message is already part of the accumulated text are skipped,
/// since some wrappers repeat their inner error in their own `Display`.
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut detail = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let message = cause.to_string();
        if !message.is_empty() && !detail.contains(&message) {
            detail.push_str(": ");
            detail.push_str(&message);
        }
        source = cause.source();
    }
    detail
}

impl From<base64::DecodeError> for AuthError {
    fn from(err: base64::DecodeError) -> Self {
        Self::Decode(err.to_string())
    }
}
