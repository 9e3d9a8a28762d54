//! RS256 signing (RSASSA-PKCS1-v1_5 with SHA-256).

use rsa::pkcs1::DecodeRsaPrivateKey;
use rsa::pkcs8::DecodePrivateKey;
use rsa::traits::PublicKeyParts;
use rsa::{Pkcs1v15Sign, RsaPrivateKey, RsaPublicKey};
use sha2::{Digest, Sha256};

use crate::error::AuthError;

/// Signs JWT signing input with a parsed RSA private key.
///
/// Accepts PKCS#8 (`BEGIN PRIVATE KEY`) and PKCS#1 (`BEGIN RSA PRIVATE KEY`)
/// PEM. Parse failures never echo the input.
#[derive(Clone)]
pub struct Rs256Signer {
    key: RsaPrivateKey,
}

impl Rs256Signer {
    pub fn from_pem(pem: &str) -> Result<Self, AuthError> {
        let pem = pem.trim();
        if pem.is_empty() {
            return Err(AuthError::InvalidPrivateKeyFormat);
        }
        let key = RsaPrivateKey::from_pkcs8_pem(pem)
            .or_else(|_| RsaPrivateKey::from_pkcs1_pem(pem))
            .map_err(|_| AuthError::InvalidPrivateKeyFormat)?;
        Ok(Self { key })
    }

    /// One-shot: parse `pem` and sign `signing_input`.
    pub fn sign_with_pem(signing_input: &[u8], pem: &str) -> Result<Vec<u8>, AuthError> {
        Self::from_pem(pem)?.sign(signing_input)
    }

    /// PKCS#1 v1.5 signature over SHA-256(`signing_input`).
    pub fn sign(&self, signing_input: &[u8]) -> Result<Vec<u8>, AuthError> {
        let digest = Sha256::digest(signing_input);
        self.key
            .sign(Pkcs1v15Sign::new::<Sha256>(), &digest)
            .map_err(|e| AuthError::SigningFailure(e.to_string()))
    }

    pub fn public_key(&self) -> RsaPublicKey {
        self.key.to_public_key()
    }

    /// Signature length in bytes (the modulus size).
    pub fn signature_len(&self) -> usize {
        self.key.size()
    }
}

impl std::fmt::Debug for Rs256Signer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rs256Signer")
            .field("modulus_bits", &(self.key.size() * 8))
            .finish_non_exhaustive()
    }
}
