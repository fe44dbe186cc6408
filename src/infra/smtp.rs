//! SMTP mail transport backed by lettre.

use async_trait::async_trait;
use lettre::transport::smtp::{self, authentication::Credentials};
use lettre::{AsyncSmtpTransport, AsyncTransport, Tokio1Executor};

use super::mailer::{compose_email, Ack, Mailer, TransportError};
use crate::config::{EmailBackend, EmailSettings};
use crate::domain::OutboundMessage;
use crate::errors::{AppError, AppResult};

/// SMTP relay client.
///
/// The connection timeout comes from EMAIL_TIMEOUT and is enforced here,
/// not by callers.
#[derive(Clone)]
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailer {
    /// Create the SMTP client. Must be called inside a Tokio runtime.
    ///
    /// EMAIL_USE_SSL selects implicit TLS, EMAIL_USE_TLS selects STARTTLS,
    /// neither means a plain connection.
    pub fn from_settings(settings: &EmailSettings) -> AppResult<Self> {
        let host = settings
            .host
            .as_deref()
            .ok_or_else(|| AppError::configuration("EMAIL_HOST must be set for SMTP delivery"))?;

        let builder = if settings.use_ssl {
            AsyncSmtpTransport::<Tokio1Executor>::relay(host)
        } else if settings.use_tls {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)
        } else {
            Ok(AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(host))
        }
        .map_err(|e| AppError::configuration(format!("Invalid SMTP relay {}: {}", host, e)))?;

        let mut builder = builder
            .port(settings.port)
            .timeout(Some(settings.timeout));

        if let Some((user, password)) = settings.credentials() {
            builder = builder.credentials(Credentials::new(user.to_string(), password.to_string()));
        }

        tracing::debug!(
            host = %host,
            port = settings.port,
            tls = settings.use_tls,
            ssl = settings.use_ssl,
            "SMTP transport configured"
        );

        Ok(Self {
            transport: builder.build(),
        })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, message: &OutboundMessage) -> Result<Ack, TransportError> {
        let email = compose_email(message)?;

        let response = self.transport.send(email).await.map_err(classify)?;

        let detail = format!(
            "{} {}",
            response.code(),
            response.message().collect::<Vec<_>>().join(" ")
        );
        tracing::info!(to = ?message.to, reply = %detail, "Email delivered");

        Ok(Ack::new(detail))
    }

    fn backend(&self) -> EmailBackend {
        EmailBackend::Smtp
    }
}

/// Map a lettre SMTP error onto the transport taxonomy.
fn classify(err: smtp::Error) -> TransportError {
    let detail = err.to_string();

    // 530/534/535: authentication required, too weak, or rejected
    if let Some(code) = err.status() {
        if code.to_string().starts_with("53") {
            return TransportError::AuthFailure(detail);
        }
    }

    let from_server = err.is_response() || err.is_transient() || err.is_permanent();
    if err.is_timeout() || err.is_tls() || (!from_server && !err.is_client()) {
        return TransportError::ConnectionFailure(detail);
    }

    TransportError::Other(detail)
}
