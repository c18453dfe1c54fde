//! Contact form

use std::sync::LazyLock;

use jiff::Timestamp;
use regex::Regex;
use thiserror::Error;

use crate::email;

/// Confirmation cards show at most this many characters of the message.
pub const MESSAGE_PREVIEW_CHARS: usize = 160;

// 10-digit Indian mobile number, after whitespace normalization.
static MOBILE_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[6-9][0-9]{9}$").ok());

/// Reasons a contact submission is refused. All are non-fatal notices.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ContactError {
    /// Name, email or message not provided.
    #[error("Please fill all fields before sending.")]
    MissingFields,

    /// Email does not look deliverable.
    #[error("Please enter a valid email address (e.g., user@example.com)")]
    InvalidEmail,

    /// Mobile number provided but not a valid Indian mobile number.
    #[error("Please enter a valid 10-digit Indian mobile number")]
    InvalidMobile,

    /// A submission is already in flight.
    #[error("Your message is already being sent.")]
    AlreadySending,
}

/// Raw contact-form input, as read from the page.
#[derive(Debug, Clone, Default)]
pub struct ContactForm {
    /// Name field
    pub name: String,

    /// Email field
    pub email: String,

    /// Mobile field; blank means not provided
    pub mobile: String,

    /// Message field
    pub message: String,
}

impl ContactForm {
    /// Validate and normalize the form.
    ///
    /// Name, email and message are required and trimmed. The mobile
    /// number is optional; when provided it is stripped of whitespace
    /// and must be a valid 10-digit Indian number.
    ///
    /// # Errors
    ///
    /// - [`ContactError::MissingFields`]: a required field is blank.
    /// - [`ContactError::InvalidEmail`]: email fails format validation.
    /// - [`ContactError::InvalidMobile`]: mobile fails format validation.
    pub fn validate(&self) -> Result<ContactRequest, ContactError> {
        let name = self.name.trim();
        let email = self.email.trim();
        let message = self.message.trim();

        if name.is_empty() || email.is_empty() || message.is_empty() {
            return Err(ContactError::MissingFields);
        }

        if !email::is_valid(email) {
            return Err(ContactError::InvalidEmail);
        }

        let mobile: String = self.mobile.split_whitespace().collect();
        let mobile = if mobile.is_empty() {
            None
        } else if is_valid_mobile(&mobile) {
            Some(mobile)
        } else {
            return Err(ContactError::InvalidMobile);
        };

        Ok(ContactRequest {
            name: name.to_owned(),
            email: email.to_owned(),
            mobile,
            message: message.to_owned(),
        })
    }
}

/// A validated, normalized contact request awaiting its send window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactRequest {
    /// Submitter name
    pub name: String,

    /// Submitter email
    pub email: String,

    /// Normalized mobile number, if provided
    pub mobile: Option<String>,

    /// Message body
    pub message: String,
}

impl ContactRequest {
    /// The confirmation-card payload for this request.
    #[must_use]
    pub fn card(&self) -> ContactCard {
        ContactCard {
            name: self.name.clone(),
            email: self.email.clone(),
            message: Some(self.message.clone()),
        }
    }

    /// Timestamp the request into a logged submission.
    #[must_use]
    pub fn into_submission(self, submitted_at: Timestamp) -> ContactSubmission {
        ContactSubmission {
            name: self.name,
            email: self.email,
            mobile: self.mobile,
            message: self.message,
            submitted_at,
        }
    }
}

/// One submission, kept in memory for the page lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSubmission {
    /// Submitter name
    pub name: String,

    /// Submitter email
    pub email: String,

    /// Normalized mobile number, if provided
    pub mobile: Option<String>,

    /// Message body
    pub message: String,

    /// When the submission was accepted
    pub submitted_at: Timestamp,
}

/// What the contact confirmation view shows.
///
/// The message is present on a fresh submission; a confirmation replayed
/// from the navigation stack is redacted to name and email only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactCard {
    /// Submitter name
    pub name: String,

    /// Submitter email
    pub email: String,

    /// Message body, when not redacted
    pub message: Option<String>,
}

impl ContactCard {
    /// Message preview, shortened to [`MESSAGE_PREVIEW_CHARS`].
    #[must_use]
    pub fn message_preview(&self) -> Option<String> {
        self.message.as_deref().map(|message| {
            if message.chars().count() > MESSAGE_PREVIEW_CHARS {
                let mut preview: String = message.chars().take(MESSAGE_PREVIEW_CHARS).collect();
                preview.push('…');
                preview
            } else {
                message.to_owned()
            }
        })
    }
}

fn is_valid_mobile(value: &str) -> bool {
    MOBILE_PATTERN
        .as_ref()
        .is_some_and(|pattern| pattern.is_match(value))
}
