//! reCAPTCHA verification for the generic form endpoint.
//!
//! A failed check is reported to the caller but never blocks a submission;
//! the handler only logs it.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

/// Google's verification endpoint.
pub const RECAPTCHA_VERIFY_URL: &str = "https://www.google.com/recaptcha/api/siteverify";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, thiserror::Error)]
pub enum CaptchaError {
    #[error("captcha request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("captcha rejected: {0}")]
    Rejected(String),
}

/// Verifies a client-supplied captcha token.
#[async_trait]
pub trait CaptchaVerifier: Send + Sync {
    async fn verify(&self, token: &str) -> Result<(), CaptchaError>;
}

#[derive(Debug, Deserialize)]
struct SiteVerifyResponse {
    success: bool,
    #[serde(default, rename = "error-codes")]
    error_codes: Vec<String>,
}

pub struct RecaptchaVerifier {
    client: reqwest::Client,
    secret: String,
    verify_url: String,
}

impl RecaptchaVerifier {
    pub fn new(secret: impl Into<String>) -> Self {
        Self::with_url(secret, RECAPTCHA_VERIFY_URL)
    }

    pub fn with_url(secret: impl Into<String>, verify_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to build reqwest HTTP client");
        Self {
            client,
            secret: secret.into(),
            verify_url: verify_url.into(),
        }
    }
}

#[async_trait]
impl CaptchaVerifier for RecaptchaVerifier {
    async fn verify(&self, token: &str) -> Result<(), CaptchaError> {
        let response: SiteVerifyResponse = self
            .client
            .post(&self.verify_url)
            .form(&[("secret", self.secret.as_str()), ("response", token)])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if response.success {
            Ok(())
        } else {
            Err(CaptchaError::Rejected(response.error_codes.join(", ")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_failure_codes() {
        let parsed: SiteVerifyResponse = serde_json::from_str(
            r#"{"success": false, "error-codes": ["invalid-input-response", "timeout-or-duplicate"]}"#,
        )
        .unwrap();
        assert!(!parsed.success);
        assert_eq!(parsed.error_codes.len(), 2);
    }

    #[test]
    fn error_codes_default_to_empty() {
        let parsed: SiteVerifyResponse = serde_json::from_str(r#"{"success": true}"#).unwrap();
        assert!(parsed.success);
        assert!(parsed.error_codes.is_empty());
    }
}
