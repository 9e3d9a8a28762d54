//! Compact JWT serialization: `header.payload.signature`.

use std::fmt;

use crate::encoding::Base64UrlCodec;
use crate::error::AuthError;
use crate::jwt::signer::Rs256Signer;

/// A JWT in compact form. Always three non-empty base64url segments.
#[derive(Clone, PartialEq, Eq)]
pub struct Jwt {
    header: String,
    payload: String,
    signature: String,
}

impl Jwt {
    /// Parse and shape-check a compact JWT.
    pub fn parse(token: &str) -> Result<Self, AuthError> {
        let mut parts = token.split('.');
        let (Some(header), Some(payload), Some(signature), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(AuthError::Decode(
                "JWT must have exactly three segments".to_string(),
            ));
        };
        for (name, segment) in [
            ("header", header),
            ("payload", payload),
            ("signature", signature),
        ] {
            if !Base64UrlCodec::is_valid_segment(segment) {
                return Err(AuthError::Decode(format!(
                    "JWT {name} segment is not valid base64url"
                )));
            }
        }
        Ok(Self {
            header: header.to_string(),
            payload: payload.to_string(),
            signature: signature.to_string(),
        })
    }

    pub fn header_segment(&self) -> &str {
        &self.header
    }

    pub fn payload_segment(&self) -> &str {
        &self.payload
    }

    pub fn signature_segment(&self) -> &str {
        &self.signature
    }

    /// `encodedHeader.encodedPayload`, the bytes covered by the signature.
    pub fn signing_input(&self) -> String {
        format!("{}.{}", self.header, self.payload)
    }

    pub fn into_string(self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Jwt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.header, self.payload, self.signature)
    }
}

// A signed assertion is a bearer credential; keep it out of debug logs.
impl fmt::Debug for Jwt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Jwt")
            .field("header", &self.header)
            .finish_non_exhaustive()
    }
}

/// Joins encoded segments into a compact JWT.
#[derive(Debug, Clone, Copy, Default)]
pub struct JwtAssembler;

impl JwtAssembler {
    /// The signing input for raw `header` and `payload` bytes.
    pub fn signing_input(header: &[u8], payload: &[u8]) -> String {
        format!(
            "{}.{}",
            Base64UrlCodec::encode(header),
            Base64UrlCodec::encode(payload)
        )
    }

    pub fn assemble(header: &[u8], payload: &[u8], signature: &[u8]) -> Jwt {
        Jwt {
            header: Base64UrlCodec::encode(header),
            payload: Base64UrlCodec::encode(payload),
            signature: Base64UrlCodec::encode(signature),
        }
    }

    /// Sign `header.payload` with `signer` and assemble the result.
    pub fn sign_and_assemble(
        header: &[u8],
        payload: &[u8],
        signer: &Rs256Signer,
    ) -> Result<Jwt, AuthError> {
        let signing_input = Self::signing_input(header, payload);
        let signature = signer.sign(signing_input.as_bytes())?;
        Ok(Self::assemble(header, payload, &signature))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn joins_three_segments() {
        let jwt = JwtAssembler::assemble(br#"{"alg":"RS256","typ":"JWT"}"#, b"{}", &[1, 2, 3]);
        assert_eq!(
            jwt.to_string(),
            "eyJhbGciOiJSUzI1NiIsInR5cCI6IkpXVCJ9.e30.AQID"
        );
        assert_eq!(jwt.signing_input(), "eyJhbGciOiJSUzI1NiIsInR5cCI6IkpXVCJ9.e30");
    }

    #[test]
    fn parse_accepts_assembled_tokens() {
        let jwt = JwtAssembler::assemble(b"h", b"p", b"s");
        let parsed = Jwt::parse(&jwt.to_string()).unwrap();
        assert_eq!(parsed, jwt);
        assert_eq!(parsed.payload_segment(), "cA");
    }

    #[test]
    fn parse_rejects_bad_shapes() {
        for token in ["", "a.b", "a.b.c.d", "YQ..YQ", ".YQ.YQ", "YQ.YQ.", "YQ.Y+Q.YQ", "YQ.YQ==.YQ"] {
            assert!(
                matches!(Jwt::parse(token), Err(AuthError::Decode(_))),
                "{token:?} should be rejected"
            );
        }
    }

    #[test]
    fn debug_hides_payload_and_signature() {
        let jwt = JwtAssembler::assemble(b"h", b"secret-claims", b"sig");
        let dbg = format!("{jwt:?}");
        assert!(!dbg.contains(jwt.payload_segment()));
        assert!(!dbg.contains(jwt.signature_segment()));
    }

    proptest! {
        #[test]
        fn assembled_jwt_always_has_three_valid_segments(
            header in proptest::collection::vec(any::<u8>(), 1..64),
            payload in proptest::collection::vec(any::<u8>(), 1..256),
            signature in proptest::collection::vec(any::<u8>(), 1..300),
        ) {
            let token = JwtAssembler::assemble(&header, &payload, &signature).to_string();
            let segments: Vec<&str> = token.split('.').collect();
            prop_assert_eq!(segments.len(), 3);
            for segment in segments {
                prop_assert!(Base64UrlCodec::is_valid_segment(segment));
            }
        }
    }
}
