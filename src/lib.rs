//! Personal site - pages and a contact form
//!
//! Serves a handful of template-rendered pages plus a contact form whose
//! submissions are emailed to the site owner.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Submission, outbound message and notice types
//! - **services**: The contact submission workflow
//! - **infra**: Mail transports and template rendering
//! - **api**: HTTP handlers, middleware, and routes
//! - **i18n**: Localized user-facing strings
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server
//! cargo run -- serve
//!
//! # Validate configuration and templates
//! cargo run -- check
//!
//! # Send a test email to CONTACT_RECIPIENTS
//! cargo run -- send-test-email
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod i18n;
pub mod infra;
pub mod services;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use domain::{ContactForm, Notice, OutboundMessage, Submission};
pub use errors::{AppError, AppResult};
pub use infra::{Mailer, TransportError};
