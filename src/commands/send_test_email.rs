//! Send-test-email command - Verifies outbound mail delivery.
//!
//! Sends one message through the configured transport, to the given
//! recipients or, when none are given, to CONTACT_RECIPIENTS.

use crate::cli::args::SendTestEmailArgs;
use crate::config::{Config, TEST_EMAIL_SUBJECT};
use crate::domain::OutboundMessage;
use crate::errors::AppResult;
use crate::i18n;
use crate::infra::build_mailer;

/// Execute the send-test-email command
pub async fn execute(args: SendTestEmailArgs, config: Config) -> AppResult<()> {
    let mailer = build_mailer(&config.email)?;

    let recipients = if args.recipients.is_empty() {
        config.contact.contact_recipients().to_vec()
    } else {
        args.recipients
    };

    let message = OutboundMessage::new(
        TEST_EMAIL_SUBJECT,
        i18n::test_email_body(config.language),
        config.contact.default_from_email(),
        recipients,
    );

    tracing::info!(to = ?message.to, "Sending test email");
    let ack = mailer.send(&message).await?;

    println!(
        "Test email sent to {} via {} ({})",
        message.to.join(", "),
        mailer.backend().as_str(),
        ack.detail
    );

    Ok(())
}
