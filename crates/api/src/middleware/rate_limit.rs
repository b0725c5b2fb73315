//! Per-client write rate limiting.

use std::net::SocketAddr;
use std::time::Instant;

use axum::extract::{ConnectInfo, FromRequestParts};
use axum::http::request::Parts;
use inventory_core::rate_limit::Decision;

use crate::error::AppError;
use crate::state::AppState;

/// Client key used when neither the peer address nor a forwarded address
/// is known.
pub const ANONYMOUS_CLIENT: &str = "anon";

/// Takes one permit from the shared write limiter, or rejects with 429.
#[derive(Debug, Clone, Copy)]
pub struct WriteRateLimit {
    /// Permits left in the client's current window.
    pub remaining: u32,
}

impl FromRequestParts<AppState> for WriteRateLimit {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let client = client_key(parts);
        let decision = state
            .write_limiter
            .lock()
            .await
            .try_acquire(&client, Instant::now());

        match decision {
            Decision::Allowed { remaining } => Ok(WriteRateLimit { remaining }),
            Decision::Rejected { retry_after } => {
                // Round up so clients never retry a moment too early.
                let retry_after_secs = retry_after.as_secs() + u64::from(retry_after.subsec_nanos() > 0);
                tracing::warn!(client = %client, retry_after_secs, "Write rate limit exceeded");
                Err(AppError::TooManyRequests { retry_after_secs })
            }
        }
    }
}

/// Identify the client: peer IP, else the first `X-Forwarded-For` entry,
/// else [`ANONYMOUS_CLIENT`].
pub fn client_key(parts: &Parts) -> String {
    if let Some(ConnectInfo(addr)) = parts.extensions.get::<ConnectInfo<SocketAddr>>() {
        return addr.ip().to_string();
    }

    parts
        .headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| ANONYMOUS_CLIENT.to_string())
}
