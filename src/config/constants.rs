//! Application-wide constants
//!
//! Centralized location for magic values to improve maintainability.

// =============================================================================
// Application
// =============================================================================

/// Service name reported by health checks and logs
pub const APP_NAME: &str = "user-accounts-api";

/// Application version baked in at compile time
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default URL prefix for every API route
pub const DEFAULT_API_PREFIX: &str = "/api";

// =============================================================================
// Pagination
// =============================================================================

/// Default number of items per page
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Default starting page number (1-indexed)
pub const DEFAULT_PAGE_NUMBER: i64 = 1;

// =============================================================================
// User Roles
// =============================================================================

/// Default role assigned to new users
pub const ROLE_USER: &str = "user";

/// Administrator role with elevated privileges
pub const ROLE_ADMIN: &str = "admin";

// =============================================================================
// Identity forwarding
// =============================================================================

/// Header carrying the authenticated user id, set by the upstream gateway
pub const HEADER_USER_ID: &str = "x-user-id";

/// Header carrying the authenticated user role, set by the upstream gateway
pub const HEADER_USER_ROLE: &str = "x-user-role";

// =============================================================================
// Server Configuration
// =============================================================================

/// Default server host address
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_SERVER_PORT: u16 = 3000;

/// Origin allowed by CORS when `ALLOWED_ORIGINS` is unset
pub const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:8080";

// =============================================================================
// Validation
// =============================================================================

/// Minimum password length requirement
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Minimum username length
pub const MIN_USERNAME_LENGTH: usize = 3;

/// Maximum username length
pub const MAX_USERNAME_LENGTH: usize = 20;

/// Symbols accepted in passwords besides ASCII letters and digits
pub const PASSWORD_SYMBOLS: &str = "@$!%*#?&";
