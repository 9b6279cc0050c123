//! Email delivery through the Resend HTTP API.
//!
//! [`MailConfig::from_env`] reads the API key, the admin recipient list and
//! the per-category template ids. A missing `RESEND_API_KEY` does not stop
//! the server; every send then fails with [`MailError::NotConfigured`].

use std::time::Duration;

use async_trait::async_trait;
use lettre::message::Mailbox;
use serde::Deserialize;
use serde_json::{json, Map, Value};

use crate::mailer::{parse_mailboxes, EmailContent, MailError, Mailer, OutboundEmail, SendReceipt};
use crate::routing::TemplateIds;

/// Default Resend API base URL.
pub const DEFAULT_API_URL: &str = "https://api.resend.com";

/// HTTP request timeout for a single send.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

// ---------------------------------------------------------------------------
// MailConfig
// ---------------------------------------------------------------------------

/// Email settings derived from the environment.
#[derive(Debug, Clone, Default)]
pub struct MailConfig {
    pub api_key: Option<String>,
    pub api_url: String,
    /// Recipients of admin notifications; empty disables them.
    pub admin_emails: Vec<Mailbox>,
    pub templates: TemplateIds,
}

impl MailConfig {
    /// Load configuration from environment variables.
    ///
    /// | Variable              | Required | Default                  |
    /// |-----------------------|----------|--------------------------|
    /// | `RESEND_API_KEY`      | no       | --                        |
    /// | `RESEND_API_URL`      | no       | `https://api.resend.com` |
    /// | `ADMIN_EMAILS`        | no       | empty (comma-separated)  |
    /// | `TEMPLATE_*`          | no       | see [`TemplateIds`]      |
    pub fn from_env() -> Self {
        let admin_emails = std::env::var("ADMIN_EMAILS").unwrap_or_default();
        Self {
            api_key: std::env::var("RESEND_API_KEY").ok().filter(|k| !k.is_empty()),
            api_url: std::env::var("RESEND_API_URL")
                .unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
            admin_emails: parse_mailboxes(admin_emails.split(',')),
            templates: TemplateIds::from_env(),
        }
    }
}

// ---------------------------------------------------------------------------
// ResendMailer
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct SendResponse {
    id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    message: Option<String>,
}

/// Sends email via `POST {api_url}/emails`.
pub struct ResendMailer {
    client: reqwest::Client,
    api_key: Option<String>,
    api_url: String,
}

impl ResendMailer {
    /// Create a mailer with a pre-configured HTTP client.
    pub fn new(api_key: Option<String>, api_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to build reqwest HTTP client");
        Self {
            client,
            api_key,
            api_url: api_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &MailConfig) -> Self {
        Self::new(config.api_key.clone(), config.api_url.clone())
    }

    /// Execute one POST and check the response status.
    async fn post(&self, api_key: &str, payload: &Value) -> Result<SendReceipt, MailError> {
        let response = self
            .client
            .post(format!("{}/emails", self.api_url))
            .bearer_auth(api_key)
            .json(payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ErrorResponse>()
                .await
                .ok()
                .and_then(|e| e.message)
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown").to_string());
            return Err(MailError::HttpStatus {
                status: status.as_u16(),
                message,
            });
        }

        let body: SendResponse = response.json().await?;
        Ok(SendReceipt { id: body.id })
    }
}

#[async_trait]
impl Mailer for ResendMailer {
    async fn send(&self, email: &OutboundEmail) -> Result<SendReceipt, MailError> {
        let api_key = self.api_key.as_deref().ok_or(MailError::NotConfigured)?;

        let mut payload = base_payload(email);
        match &email.content {
            EmailContent::Text(text) => {
                payload.insert("text".into(), json!(text));
                self.post(api_key, &Value::Object(payload)).await
            }
            EmailContent::Template { id } => {
                let mut current = payload.clone();
                current.insert("template".into(), json!({ "id": id, "variables": {} }));

                match self.post(api_key, &Value::Object(current)).await {
                    Err(MailError::HttpStatus { status, message }) if (400..500).contains(&status) => {
                        tracing::info!(
                            status,
                            error = %message,
                            template_id = %id,
                            "Template object rejected, retrying with template_id field"
                        );
                        payload.insert("template_id".into(), json!(id));
                        self.post(api_key, &Value::Object(payload)).await
                    }
                    other => other,
                }
            }
        }
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}

/// Envelope fields shared by text and template sends.
fn base_payload(email: &OutboundEmail) -> Map<String, Value> {
    let mut payload = Map::new();
    payload.insert("from".into(), json!(email.from.to_string()));
    payload.insert(
        "to".into(),
        json!(email.to.iter().map(|m| m.email.to_string()).collect::<Vec<_>>()),
    );
    if let Some(subject) = &email.subject {
        payload.insert("subject".into(), json!(subject));
    }
    if let Some(reply_to) = &email.reply_to {
        payload.insert("reply_to".into(), json!(reply_to.email.to_string()));
    }
    payload
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
