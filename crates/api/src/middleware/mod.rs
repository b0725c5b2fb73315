//! Request guards and response middleware.
//!
//! - [`api_key::RequireApiKey`] -- Requires a valid `X-Api-Key` header on writes.
//! - [`rate_limit::WriteRateLimit`] -- Takes one permit from the per-client write limiter.
//! - [`error_body::internal_error_body`] -- Adds `traceId` and `detail` to 500 bodies.

pub mod api_key;
pub mod error_body;
pub mod rate_limit;
