//! Application-wide constants
//!
//! Centralized location for magic values to improve maintainability.

// =============================================================================
// Server Configuration
// =============================================================================

/// Default server host address
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_SERVER_PORT: u16 = 3000;

/// Hosts accepted when ALLOWED_HOSTS is not set
pub const DEFAULT_ALLOWED_HOSTS: &str = "127.0.0.1,localhost";

/// Wildcard entry in ALLOWED_HOSTS that accepts any host
pub const ALLOW_ANY_HOST: &str = "*";

// =============================================================================
// Security
// =============================================================================

/// Minimum SECRET_KEY length (signs the flash cookie)
pub const MIN_SECRET_KEY_LENGTH: usize = 32;

/// Secret used by debug builds when SECRET_KEY is unset
pub const DEV_SECRET_KEY: &str = "dev-secret-key-minimum-32-chars!!";

/// Default HSTS max-age in seconds
pub const DEFAULT_HSTS_SECONDS: u64 = 3600;

// =============================================================================
// Pages & Assets
// =============================================================================

/// Default directory holding the page templates
pub const DEFAULT_TEMPLATES_DIR: &str = "templates";

/// Default directory served under STATIC_URL
pub const DEFAULT_STATIC_ROOT: &str = "static";

/// URL prefix for static assets
pub const STATIC_URL: &str = "/static";

/// Template rendered for unknown paths
pub const NOT_FOUND_TEMPLATE: &str = "404.html";

/// Default interface language
pub const DEFAULT_LANGUAGE_CODE: &str = "en";

// =============================================================================
// Contact Form
// =============================================================================

/// Logical endpoint of the contact form (GET renders, POST submits)
pub const CONTACT_PATH: &str = "/contact";

/// Template of the contact form page
pub const CONTACT_TEMPLATE: &str = "contact.html";

/// Subject line of every contact notification
pub const CONTACT_SUBJECT: &str = "New message from the site";

/// Name of the signed cookie carrying a pending notice across a redirect
pub const FLASH_COOKIE: &str = "flash";

// =============================================================================
// Email
// =============================================================================

/// Default SMTP port
pub const DEFAULT_EMAIL_PORT: u16 = 25;

/// Default SMTP timeout in seconds
pub const DEFAULT_EMAIL_TIMEOUT_SECONDS: u64 = 15;

/// Sender used when neither DEFAULT_FROM_EMAIL nor EMAIL_HOST_USER is set
pub const FALLBACK_FROM_EMAIL: &str = "webmaster@localhost";

/// Subject of the message sent by `send-test-email`
pub const TEST_EMAIL_SUBJECT: &str = "Test email from the site";
