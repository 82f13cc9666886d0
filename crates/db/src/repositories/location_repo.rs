//! Location resolution.
//!
//! All lookups that feed relocation endpoints are restricted to
//! storable locations: kinds `warehouse` (structural container) and
//! `view` (non-physical grouping) are excluded everywhere.

use sqlx::PgPool;
use stockmove_core::types::DbId;

use crate::models::location::Location;

/// Column list for locations queries.
const COLUMNS: &str = "id, name, kind, parent_id, created_at, updated_at";

/// Pure lookups against the `locations` table.
pub struct LocationRepo;

impl LocationRepo {
    /// Resolve a storable location by exact name. First match by id
    /// wins when names are duplicated.
    pub async fn find_storable_by_name(
        pool: &PgPool,
        name: &str,
    ) -> Result<Option<Location>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM locations
             WHERE name = $1 AND kind NOT IN ('warehouse', 'view')
             ORDER BY id
             LIMIT 1"
        );
        sqlx::query_as::<_, Location>(&query)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// Resolve both relocation endpoints with one combined lookup.
    ///
    /// A single query matches either name (storable kinds only); the
    /// results are partitioned by which requested name they carry, so
    /// `from_name == to_name` resolves both slots from the same row.
    pub async fn resolve_pair(
        pool: &PgPool,
        from_name: &str,
        to_name: &str,
    ) -> Result<(Option<Location>, Option<Location>), sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM locations
             WHERE name IN ($1, $2) AND kind NOT IN ('warehouse', 'view')
             ORDER BY id"
        );
        let rows = sqlx::query_as::<_, Location>(&query)
            .bind(from_name)
            .bind(to_name)
            .fetch_all(pool)
            .await?;

        let from = rows.iter().find(|l| l.name == from_name).cloned();
        let to = rows.iter().find(|l| l.name == to_name).cloned();
        Ok((from, to))
    }

    /// Fetch a location by primary key, any kind.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Location>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM locations WHERE id = $1");
        sqlx::query_as::<_, Location>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Fallback warehouse for sessions with no warehouse preference
    /// bound (used by the product probe).
    pub async fn find_first_warehouse(pool: &PgPool) -> Result<Option<Location>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM locations
             WHERE kind = 'warehouse'
             ORDER BY id
             LIMIT 1"
        );
        sqlx::query_as::<_, Location>(&query)
            .fetch_optional(pool)
            .await
    }

    /// Default destination for the creation form: the first storable
    /// location inside the given warehouse.
    pub async fn default_to_location(
        pool: &PgPool,
        warehouse_id: DbId,
    ) -> Result<Option<Location>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM locations
             WHERE parent_id = $1 AND kind NOT IN ('warehouse', 'view')
             ORDER BY id
             LIMIT 1"
        );
        sqlx::query_as::<_, Location>(&query)
            .bind(warehouse_id)
            .fetch_optional(pool)
            .await
    }

    /// All storable locations, for the creation/edit form context.
    pub async fn list_storable(pool: &PgPool) -> Result<Vec<Location>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM locations
             WHERE kind NOT IN ('warehouse', 'view')
             ORDER BY name, id"
        );
        sqlx::query_as::<_, Location>(&query).fetch_all(pool).await
    }
}
