//! Route definitions for the `/categories` resource.

use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::category;
use crate::state::AppState;

/// Routes mounted at `/categories`.
///
/// ```text
/// GET    /          -> list
/// POST   /          -> create
/// DELETE /{id}      -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(category::list).post(category::create))
        .route("/{id}", delete(category::delete))
}
