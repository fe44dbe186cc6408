//! Console mail transport.
//!
//! Development backend: messages are validated exactly like SMTP
//! deliveries, then written to the log instead of being sent.

use async_trait::async_trait;

use super::mailer::{compose_email, Ack, Mailer, TransportError};
use crate::config::EmailBackend;
use crate::domain::OutboundMessage;

#[derive(Debug, Clone, Default)]
pub struct ConsoleMailer;

impl ConsoleMailer {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Mailer for ConsoleMailer {
    async fn send(&self, message: &OutboundMessage) -> Result<Ack, TransportError> {
        let email = compose_email(message)?;

        tracing::info!(
            to = ?message.to,
            subject = %message.subject,
            "=== EMAIL (not sent) ===\n{}\n========================",
            String::from_utf8_lossy(&email.formatted())
        );

        Ok(Ack::new("logged to console"))
    }

    fn backend(&self) -> EmailBackend {
        EmailBackend::Console
    }
}
