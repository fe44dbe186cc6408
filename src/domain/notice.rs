//! User-facing notices shown after a redirect (flash messages).

use serde::Serialize;

use crate::i18n::{self, Lang};

/// Notice severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Error,
}

/// A pending notice. Stored by code so the text is localized at render time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    /// The contact message was delivered
    Sent,
    /// A contact field was missing or blank
    Incomplete,
    /// The mail transport rejected a header value
    InvalidHeader,
    /// The mail transport failed for any other reason
    DeliveryFailed,
}

/// Notice as exposed to templates
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedNotice {
    pub level: NoticeLevel,
    pub text: &'static str,
}

impl Notice {
    pub fn level(self) -> NoticeLevel {
        match self {
            Self::Sent => NoticeLevel::Success,
            Self::Incomplete | Self::InvalidHeader | Self::DeliveryFailed => NoticeLevel::Error,
        }
    }

    pub fn text(self, lang: Lang) -> &'static str {
        match self {
            Self::Sent => i18n::contact_sent(lang),
            Self::Incomplete => i18n::contact_incomplete(lang),
            Self::InvalidHeader => i18n::contact_invalid_header(lang),
            Self::DeliveryFailed => i18n::contact_delivery_failed(lang),
        }
    }

    pub fn render(self, lang: Lang) -> RenderedNotice {
        RenderedNotice {
            level: self.level(),
            text: self.text(lang),
        }
    }

    /// Stable identifier used as the flash cookie value.
    pub fn code(self) -> &'static str {
        match self {
            Self::Sent => "contact-sent",
            Self::Incomplete => "contact-incomplete",
            Self::InvalidHeader => "contact-invalid-header",
            Self::DeliveryFailed => "contact-delivery-failed",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        [
            Self::Sent,
            Self::Incomplete,
            Self::InvalidHeader,
            Self::DeliveryFailed,
        ]
        .into_iter()
        .find(|notice| notice.code() == code)
    }
}
