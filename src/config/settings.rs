//! Application settings loaded from environment variables.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use super::constants::{
    DEFAULT_ALLOWED_HOSTS, DEFAULT_EMAIL_PORT, DEFAULT_EMAIL_TIMEOUT_SECONDS,
    DEFAULT_HSTS_SECONDS, DEFAULT_LANGUAGE_CODE, DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT,
    DEFAULT_STATIC_ROOT, DEFAULT_TEMPLATES_DIR, DEV_SECRET_KEY, FALLBACK_FROM_EMAIL,
    MIN_SECRET_KEY_LENGTH,
};
use crate::errors::{AppError, AppResult};
use crate::i18n::Lang;

/// Application configuration
#[derive(Clone)]
pub struct Config {
    secret_key: String,
    pub debug: bool,
    pub allowed_hosts: Vec<String>,
    pub csrf_trusted_origins: Vec<String>,
    pub server_host: String,
    pub server_port: u16,
    pub templates_dir: PathBuf,
    pub static_root: PathBuf,
    pub language: Lang,
    pub email: EmailSettings,
    pub contact: ContactSettings,
    pub security: SecuritySettings,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("secret_key", &"[REDACTED]")
            .field("debug", &self.debug)
            .field("allowed_hosts", &self.allowed_hosts)
            .field("csrf_trusted_origins", &self.csrf_trusted_origins)
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .field("templates_dir", &self.templates_dir)
            .field("static_root", &self.static_root)
            .field("language", &self.language)
            .field("email", &self.email)
            .field("contact", &self.contact)
            .field("security", &self.security)
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables (and `.env`, if present).
    ///
    /// # Errors
    /// Returns `AppError::Configuration` when a setting is missing or inconsistent:
    /// no contact recipients, a short SECRET_KEY, an unknown EMAIL_BACKEND, etc.
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let vars = Vars(lookup);

        let debug = vars.boolean("DEBUG", true);

        let secret_key = match vars.string("SECRET_KEY") {
            Some(key) => key,
            None if cfg!(debug_assertions) => {
                tracing::warn!("SECRET_KEY not set, using insecure default for development");
                DEV_SECRET_KEY.to_string()
            }
            None => {
                return Err(AppError::configuration(
                    "SECRET_KEY environment variable must be set in production",
                ))
            }
        };

        if secret_key.len() < MIN_SECRET_KEY_LENGTH {
            return Err(AppError::configuration(format!(
                "SECRET_KEY must be at least {} characters long",
                MIN_SECRET_KEY_LENGTH
            )));
        }

        let language = match vars.string("LANGUAGE_CODE") {
            Some(code) => Lang::from_code(&code).ok_or_else(|| {
                AppError::configuration(format!("Unsupported LANGUAGE_CODE: {}", code))
            })?,
            None => Lang::from_code(DEFAULT_LANGUAGE_CODE).unwrap_or_default(),
        };

        let email = EmailSettings::from_vars(&vars)?;

        let default_from_email = vars
            .string("DEFAULT_FROM_EMAIL")
            .or_else(|| email.host_user.clone())
            .unwrap_or_else(|| FALLBACK_FROM_EMAIL.to_string());
        let contact = ContactSettings::new(default_from_email, vars.list("CONTACT_RECIPIENTS", ""))?;

        let security = SecuritySettings {
            hsts_seconds: vars.parsed("SECURE_HSTS_SECONDS", DEFAULT_HSTS_SECONDS),
            hsts_include_subdomains: vars.boolean("SECURE_HSTS_INCLUDE_SUBDOMAINS", true),
            hsts_preload: vars.boolean("SECURE_HSTS_PRELOAD", true),
        };

        Ok(Self {
            secret_key,
            debug,
            allowed_hosts: vars.list("ALLOWED_HOSTS", DEFAULT_ALLOWED_HOSTS),
            csrf_trusted_origins: vars.list("CSRF_TRUSTED_ORIGINS", ""),
            server_host: vars
                .string("SERVER_HOST")
                .unwrap_or_else(|| DEFAULT_SERVER_HOST.to_string()),
            server_port: vars.parsed("SERVER_PORT", DEFAULT_SERVER_PORT),
            templates_dir: vars
                .string("TEMPLATES_DIR")
                .unwrap_or_else(|| DEFAULT_TEMPLATES_DIR.to_string())
                .into(),
            static_root: vars
                .string("STATIC_ROOT")
                .unwrap_or_else(|| DEFAULT_STATIC_ROOT.to_string())
                .into(),
            language,
            email,
            contact,
            security,
        })
    }

    /// Get secret key bytes for flash cookie signing.
    pub fn secret_key_bytes(&self) -> &[u8] {
        self.secret_key.as_bytes()
    }

    /// Get the full server address.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

/// Contact form delivery settings: who sends and who receives notifications.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSettings {
    default_from_email: String,
    contact_recipients: Vec<String>,
}

impl ContactSettings {
    /// # Errors
    /// Fails when `contact_recipients` is empty.
    pub fn new(
        default_from_email: impl Into<String>,
        contact_recipients: Vec<String>,
    ) -> AppResult<Self> {
        if contact_recipients.is_empty() {
            return Err(AppError::configuration(
                "CONTACT_RECIPIENTS must list at least one address",
            ));
        }

        Ok(Self {
            default_from_email: default_from_email.into(),
            contact_recipients,
        })
    }

    pub fn default_from_email(&self) -> &str {
        &self.default_from_email
    }

    pub fn contact_recipients(&self) -> &[String] {
        &self.contact_recipients
    }

    /// The address that receives contact notifications (first configured recipient).
    pub fn primary_recipient(&self) -> &str {
        // Non-empty by construction
        &self.contact_recipients[0]
    }
}

/// Selected mail transport
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmailBackend {
    /// Log messages instead of sending them
    #[default]
    Console,
    /// Deliver through an SMTP relay
    Smtp,
}

impl EmailBackend {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Console => "console",
            Self::Smtp => "smtp",
        }
    }
}

impl FromStr for EmailBackend {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "console" => Ok(Self::Console),
            "smtp" => Ok(Self::Smtp),
            other => Err(AppError::configuration(format!(
                "Unknown EMAIL_BACKEND: {} (expected \"console\" or \"smtp\")",
                other
            ))),
        }
    }
}

/// Outbound mail transport settings
#[derive(Clone)]
pub struct EmailSettings {
    pub backend: EmailBackend,
    pub host: Option<String>,
    pub port: u16,
    pub use_tls: bool,
    pub use_ssl: bool,
    pub timeout: Duration,
    pub host_user: Option<String>,
    pub(crate) host_password: Option<String>,
}

impl std::fmt::Debug for EmailSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmailSettings")
            .field("backend", &self.backend)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("use_tls", &self.use_tls)
            .field("use_ssl", &self.use_ssl)
            .field("timeout", &self.timeout)
            .field("host_user", &self.host_user)
            .field("host_password", &"[REDACTED]")
            .finish()
    }
}

impl Default for EmailSettings {
    fn default() -> Self {
        Self {
            backend: EmailBackend::Console,
            host: None,
            port: DEFAULT_EMAIL_PORT,
            use_tls: false,
            use_ssl: false,
            timeout: Duration::from_secs(DEFAULT_EMAIL_TIMEOUT_SECONDS),
            host_user: None,
            host_password: None,
        }
    }
}

impl EmailSettings {
    fn from_vars<F>(vars: &Vars<F>) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let backend = match vars.string("EMAIL_BACKEND") {
            Some(value) => value.parse()?,
            None => EmailBackend::default(),
        };

        let settings = Self {
            backend,
            host: vars.string("EMAIL_HOST"),
            port: vars.parsed("EMAIL_PORT", DEFAULT_EMAIL_PORT),
            use_tls: vars.boolean("EMAIL_USE_TLS", false),
            use_ssl: vars.boolean("EMAIL_USE_SSL", false),
            timeout: Duration::from_secs(
                vars.parsed("EMAIL_TIMEOUT", DEFAULT_EMAIL_TIMEOUT_SECONDS),
            ),
            host_user: vars.string("EMAIL_HOST_USER"),
            host_password: vars.string("EMAIL_HOST_PASSWORD"),
        };

        if settings.use_tls && settings.use_ssl {
            return Err(AppError::configuration(
                "EMAIL_USE_TLS and EMAIL_USE_SSL are mutually exclusive",
            ));
        }

        if settings.backend == EmailBackend::Smtp && settings.host.is_none() {
            return Err(AppError::configuration(
                "EMAIL_HOST must be set when EMAIL_BACKEND=smtp",
            ));
        }

        Ok(settings)
    }

    /// SMTP credentials, present when a user is configured.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        self.host_user
            .as_deref()
            .map(|user| (user, self.host_password.as_deref().unwrap_or_default()))
    }
}

/// Response hardening applied outside debug mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecuritySettings {
    pub hsts_seconds: u64,
    pub hsts_include_subdomains: bool,
    pub hsts_preload: bool,
}

impl SecuritySettings {
    /// Value of the `Strict-Transport-Security` header.
    pub fn hsts_header_value(&self) -> String {
        let mut value = format!("max-age={}", self.hsts_seconds);
        if self.hsts_include_subdomains {
            value.push_str("; includeSubDomains");
        }
        if self.hsts_preload {
            value.push_str("; preload");
        }
        value
    }
}

/// Typed accessors over a variable lookup
struct Vars<F>(F);

impl<F> Vars<F>
where
    F: Fn(&str) -> Option<String>,
{
    /// Trimmed value; empty counts as unset.
    fn string(&self, name: &str) -> Option<String> {
        (self.0)(name)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn boolean(&self, name: &str, default: bool) -> bool {
        match self.string(name) {
            Some(v) => matches!(v.to_lowercase().as_str(), "1" | "true" | "yes" | "on"),
            None => default,
        }
    }

    fn parsed<T: FromStr>(&self, name: &str, default: T) -> T {
        self.string(name)
            .and_then(|v| v.parse().ok())
            .unwrap_or(default)
    }

    fn list(&self, name: &str, default: &str) -> Vec<String> {
        (self.0)(name)
            .unwrap_or_else(|| default.to_string())
            .split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(str::to_string)
            .collect()
    }
}
