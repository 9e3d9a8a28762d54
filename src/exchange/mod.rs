//! Token exchange against the OAuth2 token endpoint.
//!
//! The assertion is posted as `application/x-www-form-urlencoded`
//! (`grant_type` + `assertion`). The response body is classified regardless
//! of HTTP status:
//! - a non-empty `access_token` is a success,
//! - otherwise `error_description` (or `error`) becomes the failure reason,
//! - anything else is an unexpected response.
//!
//! No retries are performed here; callers decide their own retry policy.

use async_trait::async_trait;
use reqwest::Url;
use serde_json::Value;

use crate::defaults;
use crate::error::AuthError;
use crate::types::{AccessToken, IssuerConfig, TokenExchangeResult};

/// Exchanges a signed assertion for an access token.
///
/// Implemented by [`TokenExchangeClient`] over HTTP; other implementations can
/// stand in for it (e.g. in-process fakes).
#[async_trait]
pub trait TokenExchange: Send + Sync {
    async fn request_token(&self, assertion: &str) -> Result<AccessToken, AuthError>;
}

/// HTTP client for the token endpoint.
#[derive(Debug, Clone)]
pub struct TokenExchangeClient {
    http: reqwest::Client,
    endpoint: Url,
}

impl TokenExchangeClient {
    /// Create a new client.
    /// - `http` can be a shared reqwest client; it should carry a request timeout.
    pub fn new(http: reqwest::Client, endpoint: Url) -> Self {
        Self { http, endpoint }
    }

    /// Create a client whose HTTP settings come from `config`.
    pub fn from_config(config: &IssuerConfig) -> Result<Self, AuthError> {
        Ok(Self::new(
            config.build_http_client()?,
            config.token_endpoint_url()?,
        ))
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// POST `assertion` to `endpoint` and classify the response.
    pub async fn exchange(&self, assertion: &str, endpoint: &Url) -> TokenExchangeResult {
        self.try_exchange(assertion, endpoint).await.into()
    }

    /// Like [`exchange`](Self::exchange), keeping the typed error.
    pub async fn try_exchange(
        &self,
        assertion: &str,
        endpoint: &Url,
    ) -> Result<AccessToken, AuthError> {
        let form = [
            ("grant_type", defaults::oauth::JWT_BEARER_GRANT_TYPE),
            ("assertion", assertion),
        ];

        tracing::debug!(endpoint = %endpoint, "posting JWT bearer assertion");
        let resp = self
            .http
            .post(endpoint.clone())
            .form(&form)
            .send()
            .await
            .map_err(|e| {
                let err = AuthError::from(e);
                tracing::warn!(endpoint = %endpoint, reason = %err, "token endpoint request failed");
                err
            })?;

        let status = resp.status();
        let body = resp.text().await?;
        tracing::debug!(status = status.as_u16(), "token endpoint responded");

        let result = classify_response(&body);
        match &result {
            Ok(_) => tracing::info!(status = status.as_u16(), "access token issued"),
            Err(e) => tracing::warn!(status = status.as_u16(), reason = %e, "token exchange failed"),
        }
        result
    }
}

#[async_trait]
impl TokenExchange for TokenExchangeClient {
    async fn request_token(&self, assertion: &str) -> Result<AccessToken, AuthError> {
        self.try_exchange(assertion, &self.endpoint).await
    }
}

/// Map a token endpoint response body to a token or an error.
pub fn classify_response(body: &str) -> Result<AccessToken, AuthError> {
    let json: Value =
        serde_json::from_str(body).map_err(|_| AuthError::UnexpectedResponseFormat)?;
    let Some(obj) = json.as_object() else {
        return Err(AuthError::UnexpectedResponseFormat);
    };

    let non_empty = |key: &str| {
        obj.get(key)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    };

    if let Some(access_token) = non_empty("access_token") {
        return Ok(AccessToken {
            access_token,
            token_type: non_empty("token_type"),
            expires_in: obj.get("expires_in").and_then(Value::as_i64),
        });
    }

    match non_empty("error_description").or_else(|| non_empty("error")) {
        Some(message) => Err(AuthError::TokenEndpoint { message }),
        None => Err(AuthError::UnexpectedResponseFormat),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn access_token_is_success() {
        let token = classify_response(
            r#"{"access_token":"ya29.abc","token_type":"Bearer","expires_in":3599}"#,
        )
        .unwrap();
        assert_eq!(token.access_token, "ya29.abc");
        assert_eq!(token.token_type.as_deref(), Some("Bearer"));
        assert_eq!(token.expires_in, Some(3599));
    }

    #[test]
    fn bare_access_token_is_success() {
        assert_eq!(
            classify_response(r#"{"access_token":"ya29.abc"}"#),
            Ok(AccessToken::new("ya29.abc"))
        );
    }

    #[test]
    fn error_description_wins_over_error() {
        assert_eq!(
            classify_response(r#"{"error":"invalid_grant","error_description":"bad assertion"}"#),
            Err(AuthError::token_endpoint("bad assertion"))
        );
    }

    #[test]
    fn error_code_used_when_no_description() {
        assert_eq!(
            classify_response(r#"{"error":"invalid_scope","error_description":""}"#),
            Err(AuthError::token_endpoint("invalid_scope"))
        );
    }

    #[test]
    fn empty_access_token_falls_through_to_error_fields() {
        assert_eq!(
            classify_response(r#"{"access_token":"","error":"invalid_client"}"#),
            Err(AuthError::token_endpoint("invalid_client"))
        );
    }

    #[test]
    fn unrecognized_bodies_are_unexpected() {
        for body in ["", "<html>502</html>", "[]", "{}", r#"{"access_token":42}"#, "null"] {
            assert_eq!(
                classify_response(body),
                Err(AuthError::UnexpectedResponseFormat),
                "{body:?}"
            );
        }
    }
}
