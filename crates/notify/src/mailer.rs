//! The [`Mailer`] seam and the message it sends.

use async_trait::async_trait;
use lettre::message::Mailbox;

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Error type for email delivery failures.
#[derive(Debug, thiserror::Error)]
pub enum MailError {
    /// The underlying HTTP request failed (network, DNS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The provider answered with a non-2xx status.
    #[error("Email provider returned HTTP {status}: {message}")]
    HttpStatus { status: u16, message: String },

    /// A sender or recipient address could not be parsed.
    #[error("Email address parse error: {0}")]
    Address(#[from] lettre::address::AddressError),

    /// No API key is configured.
    #[error("Email delivery is not configured")]
    NotConfigured,
}

// ---------------------------------------------------------------------------
// Message
// ---------------------------------------------------------------------------

/// What the email carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmailContent {
    /// Plain-text body.
    Text(String),
    /// A template stored at the provider, rendered there.
    Template { id: String },
}

/// A single outbound email.
#[derive(Debug, Clone)]
pub struct OutboundEmail {
    pub from: Mailbox,
    pub to: Vec<Mailbox>,
    /// Templates carry their own subject.
    pub subject: Option<String>,
    pub content: EmailContent,
    pub reply_to: Option<Mailbox>,
}

/// Provider acknowledgement.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SendReceipt {
    /// Provider message id, when returned.
    pub id: Option<String>,
}

/// Sends [`OutboundEmail`]s through some provider.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: &OutboundEmail) -> Result<SendReceipt, MailError>;

    /// Whether sends can succeed at all (credentials present).
    fn is_configured(&self) -> bool {
        true
    }
}

/// Parse a list of addresses, dropping (and logging) the ones that do not parse.
pub fn parse_mailboxes<'a>(raw: impl IntoIterator<Item = &'a str>) -> Vec<Mailbox> {
    raw.into_iter()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .filter_map(|s| match s.parse::<Mailbox>() {
            Ok(mailbox) => Some(mailbox),
            Err(e) => {
                tracing::warn!(address = s, error = %e, "Ignoring unparsable email address");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_mailboxes_skips_blank_and_invalid() {
        let parsed = parse_mailboxes("ops@example.org, ,not-an-email, Jo <jo@example.org>".split(','));
        let emails: Vec<String> = parsed.iter().map(|m| m.email.to_string()).collect();
        assert_eq!(emails, ["ops@example.org", "jo@example.org"]);
    }

    #[test]
    fn mail_error_display_http_status() {
        let err = MailError::HttpStatus {
            status: 422,
            message: "template not found".into(),
        };
        assert_eq!(
            err.to_string(),
            "Email provider returned HTTP 422: template not found"
        );
    }

    #[test]
    fn mail_error_display_address() {
        let addr_err: Result<lettre::Address, _> = "not-an-email".parse();
        let err = MailError::Address(addr_err.unwrap_err());
        assert!(err.to_string().contains("Email address parse error"));
    }
}
