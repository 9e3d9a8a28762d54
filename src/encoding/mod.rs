//! Wire-format encoders.
//!
//! JWT segments use URL-safe, unpadded base64 (RFC 7515 §2).

pub mod base64url;

pub use base64url::Base64UrlCodec;
