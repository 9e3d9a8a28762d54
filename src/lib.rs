//! gcp-token-issuer
//!
//! Issues OAuth2 access tokens for Google Cloud service accounts using the
//! JWT bearer grant (RFC 7523): a signed RS256 assertion is built from the
//! account's email and private key, then exchanged at the token endpoint.
//!
//! # Example
//!
//! ```rust,ignore
//! use gcp_token_issuer::{AccessTokenIssuer, ServiceAccountCredential, TokenExchangeResult};
//!
//! let issuer = AccessTokenIssuer::with_defaults()?;
//! let credential = ServiceAccountCredential::new(email, private_key_pem);
//! match issuer.issue(&credential).await {
//!     TokenExchangeResult::Success(token) => println!("{}", token.access_token),
//!     TokenExchangeResult::Failure { reason } => eprintln!("{reason}"),
//! }
//! ```
#![deny(unsafe_code)]

pub mod defaults;
pub mod encoding;
pub mod error;
pub mod exchange;
pub mod issuer;
pub mod jwt;
pub mod types;
pub mod utils;

pub use error::AuthError;
pub use exchange::{TokenExchange, TokenExchangeClient};
pub use issuer::AccessTokenIssuer;
pub use types::{
    AccessToken, IssueResponse, IssuerConfig, IssuerConfigBuilder, ServiceAccountCredential,
    TokenExchangeResult,
};
pub use utils::cancel::{CancelHandle, new_cancel_handle};
