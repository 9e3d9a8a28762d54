//! JWT header and claim set construction.
//!
//! Both are serialized to compact JSON. Serializers are free to escape `/`
//! as `\/`; any such escape is removed before encoding so the payload holds
//! plain URLs.

use serde::{Deserialize, Serialize};

use crate::defaults;
use crate::error::AuthError;

/// JOSE header of the assertion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JwtHeader {
    pub alg: String,
    pub typ: String,
}

impl Default for JwtHeader {
    fn default() -> Self {
        Self {
            alg: "RS256".to_string(),
            typ: "JWT".to_string(),
        }
    }
}

/// Claim set of a JWT bearer assertion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JwtClaims {
    pub iss: String,
    pub sub: String,
    pub aud: String,
    pub iat: i64,
    pub exp: i64,
    pub scope: String,
}

impl JwtClaims {
    /// Claims for `email` issued at `now`, valid for one hour.
    pub fn new(email: &str, audience: &str, scope: &str, now: i64) -> Self {
        Self {
            iss: email.to_string(),
            sub: email.to_string(),
            aud: audience.to_string(),
            iat: now,
            exp: now + defaults::jwt::LIFETIME_SECS,
            scope: scope.to_string(),
        }
    }
}

/// Serializes the header and claims to canonical JSON bytes.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClaimSetBuilder;

impl ClaimSetBuilder {
    pub fn build_header() -> Result<Vec<u8>, AuthError> {
        to_canonical_json(&JwtHeader::default())
    }

    /// `now` is seconds since the Unix epoch.
    pub fn build_payload(
        email: &str,
        audience: &str,
        scope: &str,
        now: i64,
    ) -> Result<Vec<u8>, AuthError> {
        to_canonical_json(&JwtClaims::new(email, audience, scope, now))
    }
}

fn to_canonical_json<T: Serialize>(value: &T) -> Result<Vec<u8>, AuthError> {
    let json = serde_json::to_vec(value)?;
    Ok(unescape_slashes(json))
}

/// Replace `\/` escapes with `/`, leaving every other escape intact.
fn unescape_slashes(json: Vec<u8>) -> Vec<u8> {
    if !json.windows(2).any(|w| w == b"\\/") {
        return json;
    }
    let mut out = Vec::with_capacity(json.len());
    let mut bytes = json.into_iter();
    while let Some(b) = bytes.next() {
        if b != b'\\' {
            out.push(b);
            continue;
        }
        match bytes.next() {
            Some(b'/') => out.push(b'/'),
            Some(next) => {
                out.push(b'\\');
                out.push(next);
            }
            None => out.push(b'\\'),
        }
    }
    out
}
