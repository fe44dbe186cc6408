//! Domain layer - Core entities of the contact workflow
//!
//! Request-scoped values only: nothing here is ever persisted.
//! Contains: the submitted form, the composed email, and user notices.

pub mod message;
pub mod notice;
pub mod submission;

pub use message::OutboundMessage;
pub use notice::{Notice, NoticeLevel, RenderedNotice};
pub use submission::{ContactForm, Submission};
