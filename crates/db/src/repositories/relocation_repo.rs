//! Relocation record store.
//!
//! Pool-level operations cover the single-record paths (create, edit,
//! detail, list). The batch confirm/delete paths take a transaction
//! connection instead: the draft filter is re-evaluated and the rows
//! locked inside the same transaction as the mutation, so concurrent
//! batches are serialized by row locks rather than acting on a stale
//! candidate set.

use chrono::NaiveDate;
use sqlx::{PgConnection, PgPool};
use stockmove_core::types::DbId;

use crate::models::relocation::{CreateRelocation, Relocation, UpdateDraftRelocation};

/// Column list for relocations queries.
const COLUMNS: &str = "id, company_id, employee_id, warehouse_id, product_id, \
    uom, quantity, from_location_id, to_location_id, planned_date, state, \
    created_at, updated_at";

/// CRUD and workflow queries for relocations.
pub struct RelocationRepo;

impl RelocationRepo {
    /// Insert a new draft, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateRelocation,
    ) -> Result<Relocation, sqlx::Error> {
        let query = format!(
            "INSERT INTO relocations
                (company_id, employee_id, warehouse_id, product_id, uom,
                 quantity, from_location_id, to_location_id, planned_date)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Relocation>(&query)
            .bind(input.company_id)
            .bind(input.employee_id)
            .bind(input.warehouse_id)
            .bind(input.product_id)
            .bind(&input.uom)
            .bind(input.quantity)
            .bind(input.from_location_id)
            .bind(input.to_location_id)
            .bind(input.planned_date)
            .fetch_one(pool)
            .await
    }

    /// Find a relocation by primary key, any state.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Relocation>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM relocations WHERE id = $1");
        sqlx::query_as::<_, Relocation>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a relocation by primary key, drafts only. Used by the edit
    /// paths: a confirmed record is invisible to them.
    pub async fn find_draft_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<Relocation>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM relocations WHERE id = $1 AND state = 'draft'"
        );
        sqlx::query_as::<_, Relocation>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Overwrite the user-editable fields of a draft.
    ///
    /// The UPDATE is gated on `state = 'draft'`; `None` means the id
    /// does not exist or the record is no longer a draft, which the
    /// caller reports as not-found rather than a validation advisory.
    pub async fn update_draft(
        pool: &PgPool,
        id: DbId,
        input: &UpdateDraftRelocation,
    ) -> Result<Option<Relocation>, sqlx::Error> {
        let query = format!(
            "UPDATE relocations
             SET product_id = $1, uom = $2, quantity = $3,
                 from_location_id = $4, to_location_id = $5,
                 updated_at = now()
             WHERE id = $6 AND state = 'draft'
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Relocation>(&query)
            .bind(input.product_id)
            .bind(&input.uom)
            .bind(input.quantity)
            .bind(input.from_location_id)
            .bind(input.to_location_id)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Relocations planned on or after `from_date`, optionally limited
    /// to one employee's records. Feeds the list view.
    pub async fn list_from_date(
        pool: &PgPool,
        from_date: NaiveDate,
        employee_id: Option<DbId>,
    ) -> Result<Vec<Relocation>, sqlx::Error> {
        match employee_id {
            Some(employee_id) => {
                let query = format!(
                    "SELECT {COLUMNS} FROM relocations
                     WHERE planned_date >= $1 AND employee_id = $2
                     ORDER BY planned_date, id"
                );
                sqlx::query_as::<_, Relocation>(&query)
                    .bind(from_date)
                    .bind(employee_id)
                    .fetch_all(pool)
                    .await
            }
            None => {
                let query = format!(
                    "SELECT {COLUMNS} FROM relocations
                     WHERE planned_date >= $1
                     ORDER BY planned_date, id"
                );
                sqlx::query_as::<_, Relocation>(&query)
                    .bind(from_date)
                    .fetch_all(pool)
                    .await
            }
        }
    }

    /// Re-filter candidate ids to drafts (optionally owned by one
    /// employee) and lock the surviving rows for the remainder of the
    /// transaction. Non-draft and foreign ids are silently dropped.
    pub async fn lock_drafts(
        conn: &mut PgConnection,
        ids: &[DbId],
        employee_id: Option<DbId>,
    ) -> Result<Vec<Relocation>, sqlx::Error> {
        match employee_id {
            Some(employee_id) => {
                let query = format!(
                    "SELECT {COLUMNS} FROM relocations
                     WHERE id = ANY($1) AND state = 'draft' AND employee_id = $2
                     ORDER BY id
                     FOR UPDATE"
                );
                sqlx::query_as::<_, Relocation>(&query)
                    .bind(ids)
                    .bind(employee_id)
                    .fetch_all(conn)
                    .await
            }
            None => {
                let query = format!(
                    "SELECT {COLUMNS} FROM relocations
                     WHERE id = ANY($1) AND state = 'draft'
                     ORDER BY id
                     FOR UPDATE"
                );
                sqlx::query_as::<_, Relocation>(&query)
                    .bind(ids)
                    .fetch_all(conn)
                    .await
            }
        }
    }

    /// Transition locked drafts to confirmed. Returns the row count.
    pub async fn confirm_all(conn: &mut PgConnection, ids: &[DbId]) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE relocations
             SET state = 'confirmed', updated_at = now()
             WHERE id = ANY($1) AND state = 'draft'",
        )
        .bind(ids)
        .execute(conn)
        .await?;
        Ok(result.rows_affected())
    }

    /// Delete locked drafts. Returns the row count.
    pub async fn delete_drafts(conn: &mut PgConnection, ids: &[DbId]) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM relocations WHERE id = ANY($1) AND state = 'draft'")
            .bind(ids)
            .execute(conn)
            .await?;
        Ok(result.rows_affected())
    }
}
