use axum::http::header::RETRY_AFTER;
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use inventory_core::error::CoreError;
use serde_json::json;

/// Message shown to clients for every 500.
pub const INTERNAL_ERROR_MESSAGE: &str = "An internal error occurred";

/// Underlying cause of a 500, carried as a response extension.
///
/// Never serialized by [`AppError`] itself; the error body middleware in
/// [`crate::middleware::error_body`] decides whether to expose it.
#[derive(Debug, Clone)]
pub struct InternalDetail(pub String);

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `inventory_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// The client exhausted its write allowance.
    #[error("Too many requests, retry after {retry_after_secs}s")]
    TooManyRequests { retry_after_secs: u64 },

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

/// Status, code, and message of an error response, plus what else goes in it.
struct Classified {
    status: StatusCode,
    code: &'static str,
    message: String,
    field_errors: Option<serde_json::Value>,
    detail: Option<String>,
}

impl Classified {
    fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
            field_errors: None,
            detail: None,
        }
    }

    fn internal(detail: String) -> Self {
        Self {
            detail: Some(detail),
            ..Self::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                INTERNAL_ERROR_MESSAGE,
            )
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let retry_after = match &self {
            AppError::TooManyRequests { retry_after_secs } => Some(*retry_after_secs),
            _ => None,
        };

        let classified = match self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => Classified::new(
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::Validation(result) => Classified {
                    field_errors: Some(json!(result)),
                    ..Classified::new(
                        StatusCode::BAD_REQUEST,
                        "VALIDATION_ERROR",
                        "One or more validation errors occurred",
                    )
                },
                CoreError::Conflict(msg) => Classified::new(StatusCode::CONFLICT, "CONFLICT", msg),
                CoreError::Unauthorized(msg) => {
                    Classified::new(StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg)
                }
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    Classified::internal(msg)
                }
            },

            // --- Database errors ---
            AppError::Database(err) => classify_sqlx_error(&err),

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => Classified::new(StatusCode::BAD_REQUEST, "BAD_REQUEST", msg),
            AppError::TooManyRequests { retry_after_secs } => Classified::new(
                StatusCode::TOO_MANY_REQUESTS,
                "RATE_LIMITED",
                format!("Too many requests. Retry after {retry_after_secs} seconds"),
            ),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                Classified::internal(msg)
            }
        };

        let mut body = json!({
            "error": classified.message,
            "code": classified.code,
        });
        if let Some(errors) = classified.field_errors {
            body["errors"] = errors;
        }

        let mut response = (classified.status, axum::Json(body)).into_response();
        if let Some(secs) = retry_after {
            response
                .headers_mut()
                .insert(RETRY_AFTER, HeaderValue::from(secs));
        }
        if let Some(detail) = classified.detail {
            response.extensions_mut().insert(InternalDetail(detail));
        }
        response
    }
}

/// Classify a sqlx error into a response.
///
/// - `RowNotFound` maps to 404.
/// - Unique violations on `uq_*` constraints and foreign-key violations map to 409.
/// - Check violations and out-of-range numerics map to 400.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> Classified {
    match err {
        sqlx::Error::RowNotFound => {
            Classified::new(StatusCode::NOT_FOUND, "NOT_FOUND", "Resource not found")
        }
        sqlx::Error::Database(db_err) => {
            let constraint = db_err.constraint().unwrap_or("unknown");
            match db_err.code().as_deref() {
                // unique_violation
                Some("23505") if constraint.starts_with("uq_") => {
                    tracing::warn!(constraint, "Unique constraint rejected write");
                    return Classified::new(
                        StatusCode::CONFLICT,
                        "CONFLICT",
                        format!("Duplicate value violates unique constraint: {constraint}"),
                    );
                }
                // foreign_key_violation
                Some("23503") => {
                    tracing::warn!(constraint, "Foreign key rejected write");
                    return Classified::new(
                        StatusCode::CONFLICT,
                        "CONFLICT",
                        format!("Write violates foreign key constraint: {constraint}"),
                    );
                }
                // check_violation
                Some("23514") => {
                    return Classified::new(
                        StatusCode::BAD_REQUEST,
                        "BAD_REQUEST",
                        format!("Value violates check constraint: {constraint}"),
                    );
                }
                // numeric_value_out_of_range
                Some("22003") => {
                    return Classified::new(
                        StatusCode::BAD_REQUEST,
                        "BAD_REQUEST",
                        "Numeric value out of range",
                    );
                }
                _ => {}
            }
            tracing::error!(error = %db_err, "Database error");
            Classified::internal(db_err.to_string())
        }
        other => {
            tracing::error!(error = %other, "Database error");
            Classified::internal(other.to_string())
        }
    }
}
