//! Repository for the `products` table.
//!
//! Every insert and update stamps `updated_at` with `NOW()`.

use inventory_core::listing::ProductQuery;
use inventory_core::types::DbId;
use sqlx::PgPool;

use crate::models::product::{Product, ProductDetail, ProductInput, ProductPage};

/// Column list for products queries.
const COLUMNS: &str = "id, sku, name, price, quantity, category_id, updated_at";

/// Columns for the joined read model, `p` = products, `c` = categories.
const DETAIL_COLUMNS: &str = "p.id, p.sku, p.name, p.price, p.quantity, p.category_id, \
    c.name AS category_name, p.updated_at";

/// Shared filter for listing and counting.
///
/// `$1` is an optional `ILIKE` pattern matched against name or SKU, `$2` an
/// optional category id.
const LIST_FILTER: &str = "($1::TEXT IS NULL OR p.name ILIKE $1 OR p.sku ILIKE $1)
       AND ($2::BIGINT IS NULL OR p.category_id = $2)";

/// Provides CRUD and listing operations for products.
pub struct ProductRepo;

impl ProductRepo {
    /// Insert a new product, returning the created row.
    ///
    /// Fails with a unique violation on `uq_products_sku` or a foreign-key
    /// violation on `fk_products_category`.
    pub async fn create(pool: &PgPool, input: &ProductInput) -> Result<Product, sqlx::Error> {
        let query = format!(
            "INSERT INTO products (sku, name, price, quantity, category_id, updated_at)
             VALUES ($1, $2, $3, $4, $5, NOW())
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(&input.sku)
            .bind(&input.name)
            .bind(input.price)
            .bind(input.quantity)
            .bind(input.category_id)
            .fetch_one(pool)
            .await
    }

    /// Find a product by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Product>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM products WHERE id = $1");
        sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a product with its category name.
    pub async fn find_detail(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ProductDetail>, sqlx::Error> {
        let query = format!(
            "SELECT {DETAIL_COLUMNS}
             FROM products p
             LEFT JOIN categories c ON c.id = p.category_id
             WHERE p.id = $1"
        );
        sqlx::query_as::<_, ProductDetail>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Replace every writable field of a product, returning the updated row.
    ///
    /// Returns `None` if no product has this id.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &ProductInput,
    ) -> Result<Option<Product>, sqlx::Error> {
        let query = format!(
            "UPDATE products SET
                sku = $2,
                name = $3,
                price = $4,
                quantity = $5,
                category_id = $6,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .bind(&input.sku)
            .bind(&input.name)
            .bind(input.price)
            .bind(input.quantity)
            .bind(input.category_id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a product by ID. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Whether a product other than `exclude_id` has exactly this SKU.
    pub async fn sku_taken(
        pool: &PgPool,
        sku: &str,
        exclude_id: Option<DbId>,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT EXISTS(
                SELECT 1 FROM products
                WHERE sku = $1 AND ($2::BIGINT IS NULL OR id <> $2)
             )",
        )
        .bind(sku)
        .bind(exclude_id)
        .fetch_one(pool)
        .await
    }

    /// Run a listing query, returning one page plus the total match count.
    pub async fn search(pool: &PgPool, query: &ProductQuery) -> Result<ProductPage, sqlx::Error> {
        let pattern = query.search_pattern();

        let count_sql = format!("SELECT COUNT(*) FROM products p WHERE {LIST_FILTER}");
        let total: i64 = sqlx::query_scalar(&count_sql)
            .bind(pattern.as_deref())
            .bind(query.category_id)
            .fetch_one(pool)
            .await?;

        let page_sql = format!(
            "SELECT {DETAIL_COLUMNS}
             FROM products p
             LEFT JOIN categories c ON c.id = p.category_id
             WHERE {LIST_FILTER}
             ORDER BY {order}
             LIMIT $3 OFFSET $4",
            order = query.sort.order_by(),
        );
        let items = sqlx::query_as::<_, ProductDetail>(&page_sql)
            .bind(pattern.as_deref())
            .bind(query.category_id)
            .bind(query.page_size)
            .bind(query.offset())
            .fetch_all(pool)
            .await?;

        tracing::debug!(
            total,
            returned = items.len(),
            page = query.page,
            page_size = query.page_size,
            "Product search",
        );

        Ok(ProductPage {
            items,
            total,
            page: query.page,
            page_size: query.page_size,
        })
    }
}
