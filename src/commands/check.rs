//! Check command - Validates configuration without starting the server.
//!
//! Builds the same state `serve` would (template renderer, mail transport,
//! cookie key) and renders every page once, so misconfiguration surfaces
//! before deployment.
//!
//! ## Usage
//!
//! ```bash
//! cargo run -- check
//! ```

use crate::api::handlers::{pages::page_context, PAGES};
use crate::api::AppState;
use crate::config::{Config, CONTACT_PATH, CONTACT_TEMPLATE, NOT_FOUND_TEMPLATE};
use crate::errors::AppResult;

/// Execute the check command
pub async fn execute(config: Config) -> AppResult<()> {
    let state = AppState::from_config(config)?;
    let config = &state.config;

    let templates = PAGES
        .iter()
        .map(|page| (page.path, page.template))
        .chain([(CONTACT_PATH, CONTACT_TEMPLATE), ("/404", NOT_FOUND_TEMPLATE)]);

    for (path, template) in templates {
        state
            .renderer
            .render(template, &page_context(config, path, None))?;
        tracing::debug!(template = template, "Template renders");
    }

    println!("\n=== Configuration ===");
    println!("Debug:              {}", config.debug);
    println!("Listen address:     {}", config.server_addr());
    println!("Allowed hosts:      {}", config.allowed_hosts.join(", "));
    println!("Trusted origins:    {}", config.csrf_trusted_origins.join(", "));
    println!("Language:           {}", config.language.code());
    println!("Templates:          {}", config.templates_dir.display());
    println!("Static files:       {}", config.static_root.display());
    println!("Mail backend:       {}", config.email.backend.as_str());
    println!("From address:       {}", config.contact.default_from_email());
    println!("Contact recipient:  {}", config.contact.primary_recipient());
    println!("=====================");
    println!("System check identified no issues.\n");

    Ok(())
}
