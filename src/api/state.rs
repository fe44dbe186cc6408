//! Application state - Dependency injection container.
//!
//! Provides centralized access to all application services and infrastructure.

use std::sync::Arc;

use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;
use sha2::{Digest, Sha512};

use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::infra::{build_mailer, PageRenderer, TemplateRenderer};
use crate::services::{ContactManager, ContactService};

/// Application state containing all services (DI container).
#[derive(Clone)]
pub struct AppState {
    /// Contact form service
    pub contact_service: Arc<dyn ContactService>,
    /// Page template renderer
    pub renderer: Arc<dyn PageRenderer>,
    /// Immutable settings, loaded once at startup
    pub config: Arc<Config>,
    /// Signs the flash cookie
    cookie_key: Key,
}

impl AppState {
    /// Create application state from config.
    ///
    /// Builds the mail transport and template renderer; fails fast when
    /// either cannot be set up.
    pub fn from_config(config: Config) -> AppResult<Self> {
        let mailer = build_mailer(&config.email)?;
        let renderer = Arc::new(TemplateRenderer::new(&config.templates_dir)?);
        let contact_service = Arc::new(ContactManager::new(mailer, config.contact.clone()));

        Self::new(contact_service, renderer, config)
    }

    /// Create application state with manually injected services.
    pub fn new(
        contact_service: Arc<dyn ContactService>,
        renderer: Arc<dyn PageRenderer>,
        config: Config,
    ) -> AppResult<Self> {
        let cookie_key = derive_cookie_key(config.secret_key_bytes())?;

        Ok(Self {
            contact_service,
            renderer,
            config: Arc::new(config),
            cookie_key,
        })
    }
}

impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.cookie_key.clone()
    }
}

/// Stretch SECRET_KEY to the 64 bytes a cookie signing key needs.
fn derive_cookie_key(secret: &[u8]) -> AppResult<Key> {
    let digest = Sha512::digest(secret);
    Key::try_from(digest.as_slice())
        .map_err(|e| AppError::configuration(format!("Unusable cookie signing key: {}", e)))
}
