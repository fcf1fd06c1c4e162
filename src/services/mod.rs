//! Application services layer - Use cases and business logic.
//!
//! Callers depend on the [`UserStore`] trait so a persistent implementation
//! can replace the in-memory one without touching the HTTP layer.

mod user_store;

pub use user_store::{InMemoryUserStore, UserPage, UserStore};

#[cfg(any(test, feature = "test-utils"))]
pub use user_store::MockUserStore;
