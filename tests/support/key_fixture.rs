//! Test fixtures: a throwaway 2048-bit RSA key pair (do not use in production)
#![allow(dead_code)]

pub const PKCS8_PRIVATE_KEY: &str = include_str!("../fixtures/service_account_pkcs8.pem");
pub const PKCS1_PRIVATE_KEY: &str = include_str!("../fixtures/service_account_pkcs1.pem");
pub const PUBLIC_KEY: &str = include_str!("../fixtures/service_account_public.pem");

pub const CLIENT_EMAIL: &str = "sa@project.iam.gserviceaccount.com";

/// The PKCS#8 key with newlines escaped as literal `\n`, the way keys arrive
/// from form fields and environment variables.
pub fn escaped_private_key() -> String {
    PKCS8_PRIVATE_KEY.replace('\n', "\\n")
}

/// A service-account JSON key file for the fixture key.
pub fn service_account_json() -> String {
    serde_json::json!({
        "type": "service_account",
        "project_id": "project",
        "private_key_id": "0123456789abcdef",
        "private_key": PKCS8_PRIVATE_KEY,
        "client_email": CLIENT_EMAIL,
        "token_uri": "https://oauth2.googleapis.com/token"
    })
    .to_string()
}
