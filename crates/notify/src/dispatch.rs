//! Admin notification and auto-reply for an accepted lead.

use std::sync::Arc;

use lettre::message::Mailbox;
use lifesavers_core::lead::intent::Category;
use lifesavers_core::lead::message::format_admin_body;
use lifesavers_core::lead::Lead;

use crate::mailer::{EmailContent, MailError, Mailer, OutboundEmail, SendReceipt};
use crate::routing::{self, TemplateIds};

/// Why dispatching a lead failed.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    /// No template id configured for the category.
    #[error("Missing {var} env var")]
    MissingTemplate { category: Category, var: &'static str },

    /// The admin notification could not be sent; no auto-reply was attempted.
    #[error("Failed to send admin notification: {0}")]
    AdminNotify(#[source] MailError),

    /// The admin notification went out but the auto-reply did not.
    #[error("Auto-reply failed: {0}")]
    AutoReply(#[source] MailError),
}

/// Sends the two emails of a lead through a [`Mailer`].
#[derive(Clone)]
pub struct NotificationDispatcher {
    mailer: Arc<dyn Mailer>,
    admin_emails: Vec<Mailbox>,
    templates: TemplateIds,
}

impl NotificationDispatcher {
    pub fn new(mailer: Arc<dyn Mailer>, admin_emails: Vec<Mailbox>, templates: TemplateIds) -> Self {
        Self {
            mailer,
            admin_emails,
            templates,
        }
    }

    pub fn mailer(&self) -> &Arc<dyn Mailer> {
        &self.mailer
    }

    /// Template id for `category`, or [`DispatchError::MissingTemplate`].
    pub fn resolve_template(&self, category: Category) -> Result<&str, DispatchError> {
        self.templates
            .get(category)
            .ok_or(DispatchError::MissingTemplate {
                category,
                var: routing::template_var(category),
            })
    }

    /// Notify admins, then auto-reply to the submitter.
    ///
    /// The template is resolved before anything is sent. An admin failure
    /// stops the dispatch; the auto-reply is only attempted after the admin
    /// notification went out (or was skipped because no admins are configured).
    pub async fn dispatch(&self, lead: &Lead) -> Result<(), DispatchError> {
        let template_id = self.resolve_template(lead.category)?.to_string();

        self.notify_admin(lead)
            .await
            .map_err(DispatchError::AdminNotify)?;

        self.auto_reply(lead.category, &template_id, &lead.email)
            .await
            .map_err(DispatchError::AutoReply)?;

        Ok(())
    }

    /// Plain-text notification listing every field. Skipped with no admins.
    pub async fn notify_admin(&self, lead: &Lead) -> Result<Option<SendReceipt>, MailError> {
        if self.admin_emails.is_empty() {
            tracing::debug!(category = %lead.category, "No admin recipients configured, skipping notification");
            return Ok(None);
        }

        let reply_to = match lead.email.parse::<Mailbox>() {
            Ok(mailbox) => Some(mailbox),
            Err(e) => {
                tracing::warn!(error = %e, "Submitter address unusable as reply-to");
                None
            }
        };

        let email = OutboundEmail {
            from: routing::ADMIN_FROM.parse()?,
            to: self.admin_emails.clone(),
            subject: Some(lead.subject.clone()),
            content: EmailContent::Text(format_admin_body(&lead.fields)),
            reply_to,
        };

        let receipt = self.mailer.send(&email).await?;
        tracing::info!(
            recipients = self.admin_emails.len(),
            category = %lead.category,
            message_id = receipt.id.as_deref().unwrap_or("-"),
            "Admin notification sent"
        );
        Ok(Some(receipt))
    }

    /// Templated confirmation to the submitter.
    pub async fn auto_reply(
        &self,
        category: Category,
        template_id: &str,
        to: &str,
    ) -> Result<SendReceipt, MailError> {
        let email = OutboundEmail {
            from: routing::sender(category).parse()?,
            to: vec![to.parse()?],
            subject: None,
            content: EmailContent::Template {
                id: template_id.to_string(),
            },
            reply_to: None,
        };

        let receipt = self.mailer.send(&email).await?;
        tracing::info!(
            %category,
            template_id,
            message_id = receipt.id.as_deref().unwrap_or("-"),
            "Auto-reply sent"
        );
        Ok(receipt)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
