//! Lead intake: normalize, validate, find the submitter, classify.
//!
//! [`LeadForm::intake`] runs the whole pipeline for one request body and
//! yields either [`Intake::Trapped`] (honeypot filled, drop silently) or a
//! [`Lead`] ready for the notification dispatcher.

pub mod email;
pub mod fields;
pub mod intent;
pub mod limits;
pub mod message;

use crate::error::CoreError;

use self::fields::{Fields, RawForm};
use self::intent::Category;

/// Hidden field real visitors never fill in.
pub const HONEYPOT_FIELD: &str = "company";

/// The public form a submission came through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeadForm {
    /// General contact form; category is classified from the content.
    Contact,
    Volunteer,
    Newsletter,
}

/// A validated submission.
#[derive(Debug, Clone)]
pub struct Lead {
    pub fields: Fields,
    /// Submitter address, used as reply-to and auto-reply recipient.
    pub email: String,
    pub category: Category,
    /// Subject of the admin notification.
    pub subject: String,
}

/// Outcome of [`LeadForm::intake`].
#[derive(Debug, Clone)]
pub enum Intake {
    /// The honeypot was filled; accept without doing anything.
    Trapped,
    Accepted(Lead),
}

impl LeadForm {
    /// Category routing for this form.
    pub fn category(self, fields: &Fields) -> Category {
        match self {
            Self::Contact => intent::classify(fields),
            Self::Volunteer => Category::Volunteer,
            Self::Newsletter => Category::Newsletter,
        }
    }

    /// Admin notification subject.
    pub fn subject(self, category: Category, email: &str, fields: &Fields) -> String {
        match self {
            Self::Contact => format!(
                "New Contact Lead ({category}) - {}",
                message::submitter_identifier(Some(email), fields)
            ),
            Self::Volunteer => format!("New Volunteer Application - {email}"),
            Self::Newsletter => format!("New Newsletter Signup - {email}"),
        }
    }

    /// Run the intake pipeline over a raw body.
    pub fn intake(self, raw: &RawForm) -> Result<Intake, CoreError> {
        if raw.get(HONEYPOT_FIELD).is_some_and(fields::is_trap_filled) {
            return Ok(Intake::Trapped);
        }

        let fields = fields::normalize_fields(raw);
        limits::validate_lengths(&fields)?;

        let email = email::find_email(&fields)
            .ok_or_else(|| CoreError::Validation("A valid email is required.".into()))?;

        let category = self.category(&fields);
        let subject = self.subject(category, &email, &fields);

        Ok(Intake::Accepted(Lead {
            fields,
            email,
            category,
            subject,
        }))
    }
}
