//! Production error redaction.
//!
//! [`AppError`](crate::errors::AppError) responses always carry their full
//! diagnostics plus an [`ErrorReport`] extension. In production this layer
//! re-renders them without the diagnostic block and with a generic message
//! for server errors.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use crate::api::AppState;
use crate::errors::ErrorReport;

pub async fn error_envelope_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let response = next.run(request).await;

    if !state.config.environment.is_production() {
        return response;
    }

    let Some(report) = response.extensions().get::<ErrorReport>().cloned() else {
        return response;
    };

    let (parts, _) = response.into_parts();
    let body = Json(report.redacted_body()).into_response().into_body();
    Response::from_parts(parts, body)
}
