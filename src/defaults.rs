//! Default Configuration Values
//!
//! Centralizes the constants of the JWT bearer flow and the HTTP defaults
//! used when no explicit configuration is given.

use std::time::Duration;

/// Google OAuth2 endpoint values
pub mod oauth {
    /// Token endpoint the assertion is posted to.
    pub const TOKEN_ENDPOINT: &str = "https://oauth2.googleapis.com/token";

    /// Audience claim of the assertion. Google requires it to equal the token endpoint.
    pub const AUDIENCE: &str = "https://oauth2.googleapis.com/token";

    /// `grant_type` form value of the JWT bearer grant.
    pub const JWT_BEARER_GRANT_TYPE: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

    /// Scopes requested for every token, in this order.
    pub const DEFAULT_SCOPES: [&str; 6] = [
        "https://www.googleapis.com/auth/devstorage.full_control",
        "https://www.googleapis.com/auth/datastore",
        "https://www.googleapis.com/auth/userinfo.email",
        "https://www.googleapis.com/auth/firebase.database",
        "https://www.googleapis.com/auth/cloud-platform",
        "https://www.googleapis.com/auth/iam",
    ];
}

/// JWT assertion values
pub mod jwt {
    /// Assertion lifetime in seconds (Google's maximum).
    pub const LIFETIME_SECS: i64 = 3600;

    /// Earliest wall-clock reading accepted as a real time (2021-04-21T02:10:13Z).
    ///
    /// Devices without a synchronized clock report times near the epoch; an
    /// assertion signed with such an `iat` is always rejected by the endpoint.
    pub const MIN_VALID_TIMESTAMP: i64 = 1_618_971_013;
}

/// HTTP client default configurations
pub mod http {
    use super::*;

    /// Default request timeout for the token exchange.
    ///
    /// The endpoint normally answers well under a second; the bound exists so
    /// an unresponsive server cannot stall the caller.
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

    /// Default connection timeout
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Default User-Agent string for HTTP requests
    pub const USER_AGENT: &str = concat!("gcp-token-issuer/", env!("CARGO_PKG_VERSION"));
}
