//! JWT bearer assertion: claims, RS256 signing and compact assembly.

pub mod assembler;
pub mod claims;
pub mod signer;

pub use assembler::{Jwt, JwtAssembler};
pub use claims::{ClaimSetBuilder, JwtClaims, JwtHeader};
pub use signer::Rs256Signer;

use crate::error::AuthError;

/// Build and sign the assertion for `email` at time `now`.
pub fn build_assertion(
    signer: &Rs256Signer,
    email: &str,
    audience: &str,
    scope: &str,
    now: i64,
) -> Result<Jwt, AuthError> {
    let header = ClaimSetBuilder::build_header()?;
    let payload = ClaimSetBuilder::build_payload(email, audience, scope, now)?;
    JwtAssembler::sign_and_assemble(&header, &payload, signer)
}
