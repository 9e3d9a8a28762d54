//! Access token issuer.
//!
//! Drives the linear pipeline for one credential:
//! 1) validate the email, 2) parse the private key, 3) check the clock,
//! 4) build and sign the assertion, 5) exchange it at the token endpoint.
//!
//! Every call is independent; the issuer holds only configuration and the
//! HTTP client, so it can be shared across tasks freely.

use std::sync::Arc;

use crate::defaults;
use crate::error::AuthError;
use crate::exchange::{TokenExchange, TokenExchangeClient};
use crate::jwt::{self, Jwt, Rs256Signer};
use crate::types::{AccessToken, IssuerConfig, ServiceAccountCredential, TokenExchangeResult};
use crate::utils::cancel::CancelHandle;

/// Issues access tokens for service accounts.
#[derive(Clone)]
pub struct AccessTokenIssuer {
    config: IssuerConfig,
    exchange: Arc<dyn TokenExchange>,
}

impl AccessTokenIssuer {
    /// Create an issuer talking HTTP to `config.token_endpoint`.
    pub fn new(config: IssuerConfig) -> Result<Self, AuthError> {
        let client = TokenExchangeClient::from_config(&config)?;
        Ok(Self::with_exchange(config, Arc::new(client)))
    }

    /// Issuer for Google's endpoint with default settings.
    pub fn with_defaults() -> Result<Self, AuthError> {
        Self::new(IssuerConfig::default())
    }

    /// Create an issuer with a custom exchange implementation.
    pub fn with_exchange(config: IssuerConfig, exchange: Arc<dyn TokenExchange>) -> Self {
        Self { config, exchange }
    }

    pub fn config(&self) -> &IssuerConfig {
        &self.config
    }

    /// Issue a token using the current time.
    pub async fn issue(&self, credential: &ServiceAccountCredential) -> TokenExchangeResult {
        self.issue_at(credential, chrono::Utc::now().timestamp()).await
    }

    /// Issue a token with `iat = now` (seconds since the Unix epoch).
    pub async fn issue_at(
        &self,
        credential: &ServiceAccountCredential,
        now: i64,
    ) -> TokenExchangeResult {
        self.try_issue_at(credential, now).await.into()
    }

    /// Issue a token, giving up with `Failure("cancelled")` when `cancel` fires.
    pub async fn issue_with_cancel(
        &self,
        credential: &ServiceAccountCredential,
        cancel: &CancelHandle,
    ) -> TokenExchangeResult {
        let now = chrono::Utc::now().timestamp();
        cancel
            .run(self.try_issue_at(credential, now))
            .await
            .into()
    }

    /// Typed-error form of [`issue_at`](Self::issue_at).
    pub async fn try_issue_at(
        &self,
        credential: &ServiceAccountCredential,
        now: i64,
    ) -> Result<AccessToken, AuthError> {
        let assertion = self.build_assertion(credential, now)?;
        self.exchange.request_token(&assertion.to_string()).await
    }

    /// Validate `credential` and produce the signed assertion without exchanging it.
    pub fn build_assertion(
        &self,
        credential: &ServiceAccountCredential,
        now: i64,
    ) -> Result<Jwt, AuthError> {
        let email = credential.email();
        if let Err(e) = credential.validate_email() {
            tracing::warn!(email = %email, "rejecting credential: invalid client email");
            return Err(e);
        }

        let signer = Rs256Signer::from_pem(credential.private_key_pem()).inspect_err(|_| {
            tracing::warn!(email = %email, "rejecting credential: invalid private key");
        })?;

        if now < defaults::jwt::MIN_VALID_TIMESTAMP {
            tracing::warn!(now, "refusing to sign: clock not set");
            return Err(AuthError::ClockNotSet { now });
        }

        let assertion = jwt::build_assertion(
            &signer,
            email,
            &self.config.audience,
            &self.config.scope_string(),
            now,
        )?;
        tracing::debug!(
            email = %email,
            iat = now,
            exp = now + defaults::jwt::LIFETIME_SECS,
            "signed JWT bearer assertion"
        );
        Ok(assertion)
    }
}

impl std::fmt::Debug for AccessTokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessTokenIssuer")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
