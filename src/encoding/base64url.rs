//! URL-safe base64 without padding.
//!
//! Encoding uses the standard alphabet with `+` → `-` and `/` → `_` and
//! drops trailing `=`. Decoding accepts input with or without padding.

use base64::Engine;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};

use crate::error::AuthError;

const ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Stateless base64url codec.
#[derive(Debug, Clone, Copy, Default)]
pub struct Base64UrlCodec;

impl Base64UrlCodec {
    /// Encode bytes as unpadded base64url.
    pub fn encode(bytes: impl AsRef<[u8]>) -> String {
        ENGINE.encode(bytes)
    }

    /// Decode base64url, with or without trailing padding.
    pub fn decode(input: &str) -> Result<Vec<u8>, AuthError> {
        Ok(ENGINE.decode(input)?)
    }

    /// Whether `input` is a non-empty, canonical unpadded base64url string.
    pub fn is_valid_segment(input: &str) -> bool {
        !input.is_empty() && !input.contains('=') && ENGINE.decode(input).is_ok()
    }
}
