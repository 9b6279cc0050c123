//! Outbound email for lead intake.
//!
//! - [`Mailer`] -- the seam every sender implements; [`ResendMailer`] talks to
//!   the Resend HTTP API.
//! - [`routing`] -- static per-category sender and template table.
//! - [`NotificationDispatcher`] -- admin notification plus templated
//!   auto-reply for one [`Lead`](lifesavers_core::lead::Lead).

pub mod dispatch;
pub mod mailer;
pub mod resend;
pub mod routing;

pub use dispatch::{DispatchError, NotificationDispatcher};
pub use mailer::{EmailContent, MailError, Mailer, OutboundEmail, SendReceipt};
pub use resend::{MailConfig, ResendMailer};
pub use routing::TemplateIds;
