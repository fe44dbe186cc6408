//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. They depend on abstractions (traits) for
//! dependency inversion.

mod contact_service;

pub use contact_service::{ContactError, ContactManager, ContactOutcome, ContactService};

#[cfg(any(test, feature = "test-utils"))]
pub use contact_service::MockContactService;
