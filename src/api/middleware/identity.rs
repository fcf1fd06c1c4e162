//! Forwarded-identity middleware.
//!
//! Authentication happens upstream; the gateway forwards the verified user id
//! and role as headers. This middleware turns them into a [`CurrentUser`]
//! request extension. Requests without a usable id are anonymous.

use axum::{extract::Request, http::HeaderMap, middleware::Next, response::Response};
use uuid::Uuid;

use crate::config::{HEADER_USER_ID, HEADER_USER_ROLE};
use crate::domain::UserRole;
use crate::errors::{AppError, AppResult};

/// Acting identity for the current request
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CurrentUser {
    pub id: Option<Uuid>,
    pub role: UserRole,
}

impl CurrentUser {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn authenticated(id: Uuid, role: UserRole) -> Self {
        Self { id: Some(id), role }
    }

    /// Check if user has admin role.
    pub fn is_admin(&self) -> bool {
        self.id.is_some() && self.role.is_admin()
    }

    /// Whether `target` (a raw path id) names this user.
    pub fn is_self(&self, target: &str) -> bool {
        match (self.id, Uuid::parse_str(target)) {
            (Some(own), Ok(target)) => own == target,
            _ => false,
        }
    }

    fn from_headers(headers: &HeaderMap) -> Self {
        let header = |name: &str| headers.get(name).and_then(|v| v.to_str().ok());

        let Some(raw_id) = header(HEADER_USER_ID) else {
            return Self::anonymous();
        };

        match Uuid::parse_str(raw_id.trim()) {
            Ok(id) => {
                let role = header(HEADER_USER_ROLE).map(UserRole::from).unwrap_or_default();
                Self::authenticated(id, role)
            }
            Err(_) => {
                tracing::debug!(raw_id, "Ignoring malformed forwarded user id");
                Self::anonymous()
            }
        }
    }
}

/// Attach the forwarded identity to every request.
pub async fn identity_middleware(mut request: Request, next: Next) -> Response {
    let current_user = CurrentUser::from_headers(request.headers());
    request.extensions_mut().insert(current_user);
    next.run(request).await
}

/// Require admin role.
pub fn require_admin(user: &CurrentUser) -> AppResult<()> {
    if user.is_admin() {
        Ok(())
    } else {
        Err(AppError::Unauthorized)
    }
}

/// Require the acting user to be the target or an admin.
pub fn require_self_or_admin(user: &CurrentUser, target: &str) -> AppResult<()> {
    if user.is_admin() || user.is_self(target) {
        Ok(())
    } else {
        Err(AppError::Unauthorized)
    }
}
