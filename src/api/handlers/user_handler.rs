//! User handlers.

use axum::{
    extract::{Extension, Path, State},
    response::Json,
    routing::get,
    Router,
};
use uuid::Uuid;

use crate::api::extractors::{JsonBody, QueryParams};
use crate::api::middleware::{require_admin, require_self_or_admin, CurrentUser};
use crate::api::routes::method_not_allowed;
use crate::api::AppState;
use crate::domain::{NewUser, SafeUser, UserUpdate};
use crate::errors::{AppError, AppResult};
use crate::types::{ApiResponse, Created, Paginated, PaginationParams};

/// Create user routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(list_users)
                .post(create_user)
                .fallback(method_not_allowed),
        )
        .route(
            "/:id",
            get(get_user)
                .put(update_user)
                .delete(delete_user)
                .fallback(method_not_allowed),
        )
}

/// Unparseable ids can never match a stored user.
fn parse_user_id(raw: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| AppError::user_not_found(raw))
}

/// Register a new user
#[utoipa::path(
    post,
    path = "/api/users",
    tag = "Users",
    request_body = NewUser,
    responses(
        (status = 201, description = "User created", body = SafeUser),
        (status = 400, description = "Missing or malformed fields"),
        (status = 409, description = "Email or username already taken")
    )
)]
pub async fn create_user(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    JsonBody(mut payload): JsonBody<NewUser>,
) -> AppResult<Created<SafeUser>> {
    // Only admins may choose the role of a new account
    if payload.role.is_some() && !current_user.is_admin() {
        tracing::debug!("Dropping role requested by non-admin caller");
        payload.role = None;
    }

    let user = state.users.create_user(payload).await?;
    Ok(Created(user))
}

/// List users page by page (admin only)
#[utoipa::path(
    get,
    path = "/api/users",
    tag = "Users",
    security(("user_id" = []), ("user_role" = [])),
    params(PaginationParams),
    responses(
        (status = 200, description = "One page of users with pagination metadata"),
        (status = 403, description = "Admin role required")
    )
)]
pub async fn list_users(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    QueryParams(params): QueryParams<PaginationParams>,
) -> AppResult<Json<Paginated<SafeUser>>> {
    require_admin(&current_user)?;

    let page = state.users.get_all_users(params.to_request()).await?;
    Ok(Json(Paginated::new(
        page.users,
        page.total as u64,
        page.page,
        page.limit,
    )))
}

/// Get user by ID (own profile or admin)
#[utoipa::path(
    get,
    path = "/api/users/{id}",
    tag = "Users",
    security(("user_id" = []), ("user_role" = [])),
    params(
        ("id" = String, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User profile", body = SafeUser),
        (status = 403, description = "Can only view own profile unless admin"),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<SafeUser>> {
    require_self_or_admin(&current_user, &id)?;

    let user = state.users.get_user_by_id(parse_user_id(&id)?).await?;
    Ok(ApiResponse::success(user))
}

/// Update profile fields (own profile or admin)
///
/// `id`, `password` and `role` in the body are ignored.
#[utoipa::path(
    put,
    path = "/api/users/{id}",
    tag = "Users",
    security(("user_id" = []), ("user_role" = [])),
    params(
        ("id" = String, Path, description = "User ID")
    ),
    request_body = UserUpdate,
    responses(
        (status = 200, description = "Updated user", body = SafeUser),
        (status = 400, description = "Malformed body"),
        (status = 403, description = "Can only update own profile unless admin"),
        (status = 404, description = "User not found")
    )
)]
pub async fn update_user(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(payload): JsonBody<UserUpdate>,
) -> AppResult<ApiResponse<SafeUser>> {
    require_self_or_admin(&current_user, &id)?;

    let user = state
        .users
        .update_user(parse_user_id(&id)?, payload)
        .await?;
    Ok(ApiResponse::success(user))
}

/// Delete user permanently (own account or admin)
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    tag = "Users",
    security(("user_id" = []), ("user_role" = [])),
    params(
        ("id" = String, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User deleted"),
        (status = 403, description = "Can only delete own account unless admin"),
        (status = 404, description = "User not found")
    )
)]
pub async fn delete_user(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<()>> {
    require_self_or_admin(&current_user, &id)?;

    state.users.delete_user(parse_user_id(&id)?).await?;
    Ok(ApiResponse::message("User deleted successfully"))
}
