//! Internationalization (i18n).
//!
//! Localized strings for user-facing notices. English is the default;
//! Spanish is available as an alternative. The language is chosen once
//! from configuration and passed explicitly, never read from a global.

use serde::Serialize;

/// Supported languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    /// English (default)
    #[default]
    En,
    /// Spanish
    Es,
}

impl Lang {
    /// Parse a language code string (e.g. "en", "es", "en_US", "es-cl").
    /// Returns `None` for unrecognized codes.
    pub fn from_code(code: &str) -> Option<Self> {
        let normalized = code.trim().to_lowercase();
        let prefix = normalized.split(['_', '-']).next().unwrap_or("");
        match prefix {
            "en" => Some(Self::En),
            "es" => Some(Self::Es),
            _ => None,
        }
    }

    /// Return the ISO 639-1 code for this language.
    pub fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Es => "es",
        }
    }
}

/// Defines one translatable message function per catalog entry.
macro_rules! msg {
    ($name:ident, $en:expr, $es:expr) => {
        /// Returns the localized string for `lang`.
        pub fn $name(lang: Lang) -> &'static str {
            match lang {
                Lang::En => $en,
                Lang::Es => $es,
            }
        }
    };
}

// Contact form notices
msg!(
    contact_incomplete,
    "Please complete all fields",
    "Por favor, completa todos los campos."
);
msg!(
    contact_invalid_header,
    "Invalid header in the email",
    "Encabezado inválido en el correo."
);
msg!(
    contact_sent,
    "Thanks! Your message was sent.",
    "¡Gracias! Tu mensaje fue enviado."
);
msg!(
    contact_delivery_failed,
    "Your message could not be sent. Please try again later.",
    "No se pudo enviar tu mensaje. Inténtalo más tarde."
);

// Test email (CLI)
msg!(
    test_email_body,
    "This is a test email sent from the site's command line.",
    "Este es un correo de prueba enviado desde la línea de comandos del sitio."
);
