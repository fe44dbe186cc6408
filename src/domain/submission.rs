//! Contact form submission.

use serde::Deserialize;
use validator::{Validate, ValidationErrors};

/// Raw contact form fields as posted by the browser.
///
/// Every field is optional; an absent field is treated as empty.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactForm {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ContactForm {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: Some(name.into()),
            email: Some(email.into()),
            message: Some(message.into()),
        }
    }
}

/// A complete submission: all three fields trimmed and non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct Submission {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "Message is required"))]
    pub message: String,
}

impl Submission {
    /// Trim the posted fields and check that none is left empty.
    pub fn from_form(form: ContactForm) -> Result<Self, ValidationErrors> {
        let submission = Self {
            name: trimmed(form.name),
            email: trimmed(form.email),
            message: trimmed(form.message),
        };

        submission.validate()?;
        Ok(submission)
    }

    /// Plain-text body of the notification email.
    pub fn notification_body(&self) -> String {
        format!(
            "Name: {}\nEmail: {}\n\nMessage:\n{}",
            self.name, self.email, self.message
        )
    }
}

fn trimmed(field: Option<String>) -> String {
    field.as_deref().map(str::trim).unwrap_or_default().to_string()
}
