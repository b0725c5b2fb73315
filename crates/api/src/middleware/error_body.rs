//! Response middleware for internal errors.
//!
//! Every 500 leaving the app is rewritten to the standard error body plus
//! `traceId` (the request's `x-request-id`). Outside production the body
//! also carries `detail`, taken from the [`InternalDetail`] extension.

use std::any::Any;

use axum::body::Body;
use axum::extract::{Request, State};
use axum::http::header::{CONTENT_LENGTH, CONTENT_TYPE};
use axum::http::{HeaderValue, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::error::{AppError, InternalDetail, INTERNAL_ERROR_MESSAGE};
use crate::router::REQUEST_ID_HEADER;
use crate::state::AppState;

/// Rewrite 500 responses with a trace id and, outside production, the detail.
pub async fn internal_error_body(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let trace_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let response = next.run(request).await;
    if response.status() != StatusCode::INTERNAL_SERVER_ERROR {
        return response;
    }

    let (mut parts, _) = response.into_parts();
    let detail = parts.extensions.remove::<InternalDetail>();

    let mut body = json!({
        "error": INTERNAL_ERROR_MESSAGE,
        "code": "INTERNAL_ERROR",
    });
    if let Some(trace_id) = trace_id {
        body["traceId"] = json!(trace_id);
    }
    if let Some(InternalDetail(detail)) = detail {
        if !state.config.is_production() {
            body["detail"] = json!(detail);
        }
    }

    parts.headers.remove(CONTENT_LENGTH);
    parts
        .headers
        .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    Response::from_parts(parts, Body::from(body.to_string()))
}

/// Panic handler for `CatchPanicLayer`: logs the payload and answers 500.
pub fn panic_response(payload: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "unknown panic payload".to_string()
    };

    tracing::error!(panic = %message, "Handler panicked");
    AppError::InternalError(format!("panic: {message}")).into_response()
}
