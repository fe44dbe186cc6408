//! HTTP request handlers.

pub mod contact_handler;
pub mod pages;

pub use contact_handler::contact_routes;
pub use pages::{not_found, page_routes, PAGES};
