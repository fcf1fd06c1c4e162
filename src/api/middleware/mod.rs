//! API middleware.

mod error_envelope;
mod identity;

pub use error_envelope::error_envelope_middleware;
pub use identity::{identity_middleware, require_admin, require_self_or_admin, CurrentUser};
