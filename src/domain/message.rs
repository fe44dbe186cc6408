//! Outbound email message.

use crate::config::{ContactSettings, CONTACT_SUBJECT};

use super::Submission;

/// A fully composed email, ready for a mail transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    pub subject: String,
    pub body: String,
    pub from: String,
    pub to: Vec<String>,
    pub reply_to: Vec<String>,
}

impl OutboundMessage {
    pub fn new(
        subject: impl Into<String>,
        body: impl Into<String>,
        from: impl Into<String>,
        to: Vec<String>,
    ) -> Self {
        Self {
            subject: subject.into(),
            body: body.into(),
            from: from.into(),
            to,
            reply_to: Vec::new(),
        }
    }

    pub fn with_reply_to(mut self, address: impl Into<String>) -> Self {
        self.reply_to.push(address.into());
        self
    }

    /// Notification sent to the site owner for a contact submission.
    ///
    /// Only the first configured recipient receives it; replies go to the visitor.
    pub fn contact_notification(submission: &Submission, settings: &ContactSettings) -> Self {
        Self::new(
            CONTACT_SUBJECT,
            submission.notification_body(),
            settings.default_from_email(),
            vec![settings.primary_recipient().to_string()],
        )
        .with_reply_to(submission.email.clone())
    }

    /// Every value that ends up in a header line.
    pub fn header_values(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.subject.as_str())
            .chain(std::iter::once(self.from.as_str()))
            .chain(self.to.iter().map(String::as_str))
            .chain(self.reply_to.iter().map(String::as_str))
    }
}
