//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{health_handler, user_handler};
use crate::domain::{NewUser, SafeUser, UserRole, UserUpdate};
use crate::types::PaginationMeta;

/// OpenAPI documentation for the user accounts API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "User Accounts API",
        description = "In-memory user account management over HTTP",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        health_handler::health,
        user_handler::create_user,
        user_handler::list_users,
        user_handler::get_user,
        user_handler::update_user,
        user_handler::delete_user,
    ),
    components(
        schemas(
            UserRole,
            SafeUser,
            NewUser,
            UserUpdate,
            PaginationMeta,
            health_handler::HealthResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Service liveness"),
        (name = "Users", description = "User management operations")
    )
)]
pub struct ApiDoc;

/// Forwarded identity headers set by the upstream gateway
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "user_id",
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::with_description(
                    "X-User-Id",
                    "Id of the authenticated caller",
                ))),
            );
            components.add_security_scheme(
                "user_role",
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::with_description(
                    "X-User-Role",
                    "Role of the authenticated caller",
                ))),
            );
        }
    }
}
