//! Contact service - Handles contact form submissions.
//!
//! Validates the posted fields, composes the notification email, hands it
//! to the mail transport, and turns the result into a user notice.

use async_trait::async_trait;
use axum::http::Method;
use std::sync::Arc;
use thiserror::Error;

use crate::config::{ContactSettings, CONTACT_PATH};
use crate::domain::{ContactForm, Notice, OutboundMessage, Submission};
use crate::infra::{Ack, Mailer, TransportError};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Failures of a contact submission
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContactError {
    /// A field was missing or blank after trimming
    #[error("contact form is incomplete")]
    ValidationFailed,

    /// The transport rejected a header built from submitted data
    #[error("invalid header in the email: {0}")]
    InvalidHeader(String),

    /// Any other delivery failure
    #[error("mail delivery failed: {0}")]
    Transport(TransportError),
}

impl From<TransportError> for ContactError {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::InvalidHeader(detail) => ContactError::InvalidHeader(detail),
            other => ContactError::Transport(other),
        }
    }
}

/// What the HTTP layer should do next
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactOutcome {
    /// Show the form, without a notice
    RenderForm,
    /// Redirect to `target` and show `notice` there
    Redirect {
        notice: Notice,
        target: &'static str,
    },
}

/// Contact service trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ContactService: Send + Sync {
    /// Handle one request to the contact endpoint.
    ///
    /// Only POST submits. Incomplete forms and rejected headers become error
    /// notices; other transport failures are returned as `ContactError::Transport`.
    async fn handle(&self, method: &Method, form: ContactForm)
        -> Result<ContactOutcome, ContactError>;
}

/// Concrete implementation delivering through a [`Mailer`].
pub struct ContactManager {
    mailer: Arc<dyn Mailer>,
    settings: ContactSettings,
}

impl ContactManager {
    /// Create new contact service with its mail transport
    pub fn new(mailer: Arc<dyn Mailer>, settings: ContactSettings) -> Self {
        Self { mailer, settings }
    }

    async fn submit(&self, form: ContactForm) -> Result<Ack, ContactError> {
        let submission =
            Submission::from_form(form).map_err(|_| ContactError::ValidationFailed)?;

        let message = OutboundMessage::contact_notification(&submission, &self.settings);
        tracing::debug!(
            name = %submission.name,
            email = %submission.email,
            "Dispatching contact message"
        );

        Ok(self.mailer.send(&message).await?)
    }
}

#[async_trait]
impl ContactService for ContactManager {
    async fn handle(
        &self,
        method: &Method,
        form: ContactForm,
    ) -> Result<ContactOutcome, ContactError> {
        if *method != Method::POST {
            return Ok(ContactOutcome::RenderForm);
        }

        let notice = match self.submit(form).await {
            Ok(ack) => {
                tracing::info!(
                    backend = self.mailer.backend().as_str(),
                    detail = %ack.detail,
                    "Contact message sent"
                );
                Notice::Sent
            }
            Err(ContactError::ValidationFailed) => {
                tracing::debug!("Contact form incomplete");
                Notice::Incomplete
            }
            Err(ContactError::InvalidHeader(detail)) => {
                tracing::warn!(detail = %detail, "Contact message rejected: invalid header");
                Notice::InvalidHeader
            }
            Err(err) => return Err(err),
        };

        Ok(ContactOutcome::Redirect {
            notice,
            target: CONTACT_PATH,
        })
    }
}
