//! Shared handler state and error mapping.

pub mod companies;
pub mod menus;
pub mod permissions;

use std::sync::Arc;

use axum::http::StatusCode;
use axum::Json;
use db::{DbError, FunctionInvoker};
use serde_json::{json, Value};
use tracing::error;

/// Shared across all handlers.  The invoker is the only state: gateways are
/// free functions and hold nothing per-call.
#[derive(Clone)]
pub struct AppState {
    pub invoker: Arc<dyn FunctionInvoker>,
}

pub(crate) type ErrorResponse = (StatusCode, Json<Value>);

/// Map a gateway error onto an HTTP response.
///
/// Business-rule rejections carry the stored function's own message at 422;
/// everything else (transport failures, bad function names) is an opaque 500.
pub(crate) fn fail(err: DbError) -> ErrorResponse {
    match err {
        DbError::BusinessRule { message } => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({ "success": false, "message": message })),
        ),
        other => {
            error!(error = %other, "gateway call failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "success": false, "message": "internal error" })),
            )
        }
    }
}

/// The 404 body used by every get-by-id handler.
pub(crate) fn not_found() -> ErrorResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "success": false, "message": "not found" })),
    )
}
