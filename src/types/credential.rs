//! Service account credential supplied per call.

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use validator::Validate;

use crate::error::AuthError;

/// Email and RSA private key (PEM) of a service account.
///
/// The key is held as a secret; `Debug` output redacts it.
#[derive(Debug, Clone, Validate)]
pub struct ServiceAccountCredential {
    #[validate(email)]
    email: String,
    private_key: SecretString,
}

/// Fields read from a Google service-account JSON key file.
#[derive(Deserialize)]
struct ServiceAccountKeyFile {
    client_email: String,
    private_key: String,
}

impl ServiceAccountCredential {
    /// Create from raw fields.
    ///
    /// The email is kept exactly as given, so surrounding whitespace makes
    /// [`validate_email`](Self::validate_email) fail. Literal `\n` sequences
    /// in the key (as produced by keys pasted into form fields or environment
    /// variables) are turned into newlines.
    pub fn new(email: impl Into<String>, private_key_pem: impl Into<String>) -> Self {
        let email = email.into();
        let pem = normalize_pem(private_key_pem.into());
        Self {
            email,
            private_key: SecretString::from(pem),
        }
    }

    /// Create from a service-account JSON key file's contents.
    pub fn from_json(json: &str) -> Result<Self, AuthError> {
        let file: ServiceAccountKeyFile = serde_json::from_str(json).map_err(|e| {
            AuthError::Configuration(format!("Invalid service account JSON: {e}"))
        })?;
        Ok(Self::new(file.client_email, file.private_key))
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub(crate) fn private_key_pem(&self) -> &str {
        self.private_key.expose_secret()
    }

    /// Check the email is present and syntactically valid.
    ///
    /// On top of the `validator` email rule, the local part must be a
    /// dot-atom and the domain must have at least two non-empty labels.
    pub fn validate_email(&self) -> Result<(), AuthError> {
        if self.email.is_empty() {
            return Err(AuthError::InvalidEmailFormat);
        }
        self.validate().map_err(|_| AuthError::InvalidEmailFormat)?;
        if !has_dot_atom_parts(&self.email) {
            return Err(AuthError::InvalidEmailFormat);
        }
        Ok(())
    }
}

fn has_dot_atom_parts(email: &str) -> bool {
    if email.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return false;
    }
    let Some((local, domain)) = email.rsplit_once('@') else {
        return false;
    };
    let local_ok = local.split('.').all(|atom| !atom.is_empty());
    let domain_ok = domain.contains('.')
        && domain
            .split('.')
            .all(|label| !label.is_empty() && !label.starts_with('-') && !label.ends_with('-'));
    local_ok && domain_ok
}

fn normalize_pem(pem: String) -> String {
    if pem.contains("\\n") {
        pem.replace("\\n", "\n")
    } else {
        pem
    }
}
