//! API middleware.

mod headers;
mod hosts;

pub use headers::security_headers;
pub use hosts::{host_allowed, host_guard, origin_allowed, origin_guard};
