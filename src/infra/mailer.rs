//! Mail transport abstraction.
//!
//! Every backend receives a fully composed [`OutboundMessage`] and either
//! acknowledges delivery or reports a tagged [`TransportError`]. Header
//! validation is shared so that all backends reject the same input.

use std::sync::Arc;

use async_trait::async_trait;
use lettre::message::{header::ContentType, Mailbox};
use lettre::Message;
use thiserror::Error;

use super::{ConsoleMailer, SmtpMailer};
use crate::config::{EmailBackend, EmailSettings};
use crate::domain::OutboundMessage;
use crate::errors::AppResult;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Delivery failure reported by a mail transport
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// A header value is malformed or attempts header injection
    #[error("invalid header: {0}")]
    InvalidHeader(String),

    #[error("connection failure: {0}")]
    ConnectionFailure(String),

    #[error("authentication failure: {0}")]
    AuthFailure(String),

    #[error("{0}")]
    Other(String),
}

/// Successful delivery acknowledgement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ack {
    /// Transport-specific detail (e.g. the SMTP server reply)
    pub detail: String,
}

impl Ack {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}

/// Mail transport trait for dependency injection.
///
/// Implementations must raise failures rather than swallow them, and own
/// any timeout applied to the delivery.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Attempt delivery of one message
    async fn send(&self, message: &OutboundMessage) -> Result<Ack, TransportError>;

    /// Backend identifier
    fn backend(&self) -> EmailBackend;
}

/// Build the mail transport selected by EMAIL_BACKEND.
pub fn build_mailer(settings: &EmailSettings) -> AppResult<Arc<dyn Mailer>> {
    let mailer: Arc<dyn Mailer> = match settings.backend {
        EmailBackend::Console => Arc::new(ConsoleMailer::new()),
        EmailBackend::Smtp => Arc::new(SmtpMailer::from_settings(settings)?),
    };

    tracing::info!(backend = mailer.backend().as_str(), "Mail transport ready");
    Ok(mailer)
}

/// Reject CR/LF anywhere a value would be written into a header line.
pub fn ensure_clean_headers(message: &OutboundMessage) -> Result<(), TransportError> {
    match message
        .header_values()
        .find(|value| value.contains(['\r', '\n']))
    {
        Some(value) => Err(TransportError::InvalidHeader(format!(
            "header value contains a line break: {:?}",
            value
        ))),
        None => Ok(()),
    }
}

/// Convert an [`OutboundMessage`] into a lettre message.
pub fn compose_email(message: &OutboundMessage) -> Result<Message, TransportError> {
    ensure_clean_headers(message)?;

    let mut builder = Message::builder()
        .from(parse_mailbox(&message.from)?)
        .subject(message.subject.clone())
        .header(ContentType::TEXT_PLAIN);

    for to in &message.to {
        builder = builder.to(parse_mailbox(to)?);
    }
    for reply_to in &message.reply_to {
        builder = builder.reply_to(parse_mailbox(reply_to)?);
    }

    builder
        .body(message.body.clone())
        .map_err(|e| TransportError::InvalidHeader(e.to_string()))
}

fn parse_mailbox(address: &str) -> Result<Mailbox, TransportError> {
    address
        .parse()
        .map_err(|e| TransportError::InvalidHeader(format!("{:?}: {}", address, e)))
}
