pub mod category;
pub mod health;
pub mod product;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /categories                 list, create
/// /categories/{id}            delete
///
/// /products                   search, create
/// /products/{id}              get, update, delete
/// ```
///
/// Every non-GET route requires `X-Api-Key`. Category writes are also
/// rate limited per client.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/categories", category::router())
        .nest("/products", product::router())
}
