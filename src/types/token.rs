//! Token exchange results and the JSON envelope returned to web callers.

use serde::{Deserialize, Serialize};

use crate::error::AuthError;

/// An access token minted by the token endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessToken {
    pub access_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_type: Option<String>,
    /// Lifetime in seconds, as reported by the endpoint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_in: Option<i64>,
}

impl AccessToken {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            token_type: None,
            expires_in: None,
        }
    }
}

/// Outcome of issuing an access token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenExchangeResult {
    Success(AccessToken),
    Failure { reason: String },
}

impl TokenExchangeResult {
    pub fn failure(reason: impl Into<String>) -> Self {
        Self::Failure {
            reason: reason.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// The access token string on success.
    pub fn access_token(&self) -> Option<&str> {
        match self {
            Self::Success(token) => Some(&token.access_token),
            Self::Failure { .. } => None,
        }
    }

    /// The failure reason on failure.
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Success(_) => None,
            Self::Failure { reason } => Some(reason),
        }
    }
}

impl From<Result<AccessToken, AuthError>> for TokenExchangeResult {
    fn from(result: Result<AccessToken, AuthError>) -> Self {
        match result {
            Ok(token) => Self::Success(token),
            Err(err) => Self::Failure {
                reason: err.reason(),
            },
        }
    }
}

/// Message sent with a successful [`IssueResponse`].
pub const SUCCESS_MESSAGE: &str = "Successfully get access token";

/// Status of an [`IssueResponse`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueStatus {
    Success,
    Failure,
}

/// JSON envelope `{status, msg, token}` the web front end replies with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueResponse {
    pub status: IssueStatus,
    pub msg: String,
    pub token: String,
}

impl From<&TokenExchangeResult> for IssueResponse {
    fn from(result: &TokenExchangeResult) -> Self {
        match result {
            TokenExchangeResult::Success(token) => Self {
                status: IssueStatus::Success,
                msg: SUCCESS_MESSAGE.to_string(),
                token: token.access_token.clone(),
            },
            TokenExchangeResult::Failure { reason } => Self {
                status: IssueStatus::Failure,
                msg: reason.clone(),
                token: String::new(),
            },
        }
    }
}

impl From<TokenExchangeResult> for IssueResponse {
    fn from(result: TokenExchangeResult) -> Self {
        Self::from(&result)
    }
}
