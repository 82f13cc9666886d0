//! Product resolution.

use sqlx::PgPool;

use crate::models::product::Product;

/// Column list for products queries.
const COLUMNS: &str = "id, name, uom, created_at, updated_at";

/// Pure lookups against the `products` table.
pub struct ProductRepo;

impl ProductRepo {
    /// Resolve a product by exact display name.
    ///
    /// First match by id wins when display names are duplicated; no
    /// error is raised on ambiguity. Deterministic ordering keeps
    /// repeated calls agreeing on the same row.
    pub async fn find_by_name(pool: &PgPool, name: &str) -> Result<Option<Product>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM products
             WHERE name = $1
             ORDER BY id
             LIMIT 1"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(name)
            .fetch_optional(pool)
            .await
    }
}
