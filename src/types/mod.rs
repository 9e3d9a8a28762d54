//! Core data types: credentials, configuration and results.

pub mod config;
pub mod credential;
pub mod token;

pub use config::{IssuerConfig, IssuerConfigBuilder, parse_scope_list};
pub use credential::ServiceAccountCredential;
pub use token::{AccessToken, IssueResponse, IssueStatus, TokenExchangeResult};
