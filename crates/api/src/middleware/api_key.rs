//! API key extractor for write handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use inventory_core::api_keys::{verify_api_key, API_KEY_HEADER};
use inventory_core::error::CoreError;

use crate::error::AppError;
use crate::state::AppState;

/// Proof that the request carried the configured API key.
///
/// Add it as the first extractor of every mutating handler:
///
/// ```ignore
/// async fn create(_key: RequireApiKey, State(state): State<AppState>) -> AppResult<StatusCode> {
///     Ok(StatusCode::CREATED)
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct RequireApiKey;

impl FromRequestParts<AppState> for RequireApiKey {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let presented = parts
            .headers
            .get(API_KEY_HEADER)
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.is_empty())
            .ok_or_else(|| AppError::Core(CoreError::Unauthorized("API key missing".into())))?;

        if !verify_api_key(presented, &state.config.api_key_hash) {
            tracing::warn!(method = %parts.method, path = %parts.uri.path(), "Rejected invalid API key");
            return Err(AppError::Core(CoreError::Unauthorized(
                "Invalid API key".into(),
            )));
        }

        Ok(RequireApiKey)
    }
}
