//! Handlers for the `/products` resource.
//!
//! Every write runs the validation service first; the unique index and
//! foreign key still back it up when two writes race.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use inventory_core::error::CoreError;
use inventory_core::inventory::WriteMode;
use inventory_core::types::DbId;
use inventory_core::validation::validate_product;
use inventory_db::lookup::PgInventoryLookup;
use inventory_db::models::product::{ProductDetail, ProductInput, ProductPage};
use inventory_db::repositories::ProductRepo;

use crate::error::{AppError, AppResult};
use crate::extract::{ApiJson, ApiPath, ApiQuery};
use crate::middleware::api_key::RequireApiKey;
use crate::query::ProductListParams;
use crate::response::CreatedResponse;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Product",
        id,
    })
}

/// GET /api/products
pub async fn list(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<ProductListParams>,
) -> AppResult<Json<ProductPage>> {
    let query = params.into_query();
    let page = ProductRepo::search(&state.pool, &query).await?;
    Ok(Json(page))
}

/// GET /api/products/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
) -> AppResult<Json<ProductDetail>> {
    let product = ProductRepo::find_detail(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(product))
}

/// POST /api/products
pub async fn create(
    _key: RequireApiKey,
    State(state): State<AppState>,
    ApiJson(input): ApiJson<ProductInput>,
) -> AppResult<(StatusCode, Json<CreatedResponse>)> {
    let lookup = PgInventoryLookup::new(&state.pool);
    validate_product(&lookup, &input.candidate(), WriteMode::Create)
        .await?
        .ensure_valid()?;

    let product = ProductRepo::create(&state.pool, &input).await?;
    tracing::info!(product_id = product.id, sku = %product.sku, "Product created");

    Ok((StatusCode::CREATED, Json(CreatedResponse { id: product.id })))
}

/// PUT /api/products/{id}
pub async fn update(
    _key: RequireApiKey,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
    ApiJson(input): ApiJson<ProductInput>,
) -> AppResult<StatusCode> {
    if ProductRepo::find_by_id(&state.pool, id).await?.is_none() {
        return Err(not_found(id));
    }

    let lookup = PgInventoryLookup::new(&state.pool);
    validate_product(&lookup, &input.candidate(), WriteMode::Update(id))
        .await?
        .ensure_valid()?;

    let product = ProductRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(product_id = id, sku = %product.sku, "Product updated");

    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/products/{id}
pub async fn delete(
    _key: RequireApiKey,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
) -> AppResult<StatusCode> {
    if ProductRepo::delete(&state.pool, id).await? {
        tracing::info!(product_id = id, "Product deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}
