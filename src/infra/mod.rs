//! Infrastructure layer - External systems integration
//!
//! This module handles all external system concerns:
//! - Mail transports (SMTP, console)
//! - Page template rendering

pub mod console;
pub mod mailer;
pub mod smtp;
pub mod templates;

pub use console::ConsoleMailer;
pub use mailer::{build_mailer, compose_email, Ack, Mailer, TransportError};
pub use smtp::SmtpMailer;
pub use templates::{PageRenderer, TemplateRenderer};

#[cfg(any(test, feature = "test-utils"))]
pub use mailer::MockMailer;
#[cfg(any(test, feature = "test-utils"))]
pub use templates::MockPageRenderer;
