//! Handlers for the `/categories` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use inventory_core::error::CoreError;
use inventory_core::inventory::WriteMode;
use inventory_core::types::DbId;
use inventory_core::validation::validate_category;
use inventory_db::lookup::PgInventoryLookup;
use inventory_db::models::category::{CategorySummary, CreateCategory};
use inventory_db::repositories::CategoryRepo;

use crate::error::{AppError, AppResult};
use crate::extract::{ApiJson, ApiPath};
use crate::middleware::api_key::RequireApiKey;
use crate::middleware::rate_limit::WriteRateLimit;
use crate::response::CreatedResponse;
use crate::state::AppState;

/// GET /api/categories
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<CategorySummary>>> {
    let categories = CategoryRepo::list(&state.pool).await?;
    Ok(Json(categories))
}

/// POST /api/categories
pub async fn create(
    _key: RequireApiKey,
    _quota: WriteRateLimit,
    State(state): State<AppState>,
    ApiJson(input): ApiJson<CreateCategory>,
) -> AppResult<(StatusCode, Json<CreatedResponse>)> {
    let lookup = PgInventoryLookup::new(&state.pool);
    validate_category(&lookup, &input.candidate(), WriteMode::Create)
        .await?
        .ensure_valid()?;

    let category = CategoryRepo::create(&state.pool, &input).await?;
    tracing::info!(category_id = category.id, name = %category.name, "Category created");

    Ok((StatusCode::CREATED, Json(CreatedResponse { id: category.id })))
}

/// DELETE /api/categories/{id}
///
/// Refused with 409 while any product references the category. A product
/// added between the count and the delete trips the foreign key instead,
/// which maps to the same 409.
pub async fn delete(
    _key: RequireApiKey,
    _quota: WriteRateLimit,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
) -> AppResult<StatusCode> {
    let category = CategoryRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Category",
            id,
        }))?;

    let products = CategoryRepo::product_count(&state.pool, id).await?;
    if products > 0 {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Category '{}' still has {products} product(s) and cannot be deleted",
            category.name
        ))));
    }

    if CategoryRepo::delete(&state.pool, id).await? {
        tracing::info!(category_id = id, "Category deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Category",
            id,
        }))
    }
}
