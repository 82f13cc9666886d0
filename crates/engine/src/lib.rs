//! Inventory engine seam.
//!
//! The relocation workflow treats quantity-on-hand computation and
//! move generation as operations of an inventory engine reached
//! through the [`InventoryEngine`] trait. Business rejections come
//! back as typed [`EngineError`] values whose `detail` is surfaced to
//! the user verbatim; infrastructure failures stay separate and map to
//! server errors.
//!
//! [`StockLevelEngine`] is the default implementation, backed by the
//! `stock_levels` / `stock_moves` tables. Both trait methods run on a
//! caller-supplied connection, so confirm participates in the caller's
//! transaction: if anything fails, the whole batch rolls back.

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::PgConnection;

use stockmove_core::types::DbId;
use stockmove_db::models::product::Product;
use stockmove_db::models::relocation::Relocation;

/// A business rejection from the inventory engine.
///
/// `code` is a stable machine identifier; `detail` is the operator-
/// facing explanation, propagated verbatim into outcome messages.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{detail}")]
pub struct EngineError {
    pub code: &'static str,
    pub detail: String,
}

/// Engine call failure: either a business rejection or an
/// infrastructure error. Only the former is user-visible.
#[derive(Debug, thiserror::Error)]
pub enum EngineFailure {
    #[error(transparent)]
    Rejected(#[from] EngineError),

    #[error("Database error: {0}")]
    Db(#[from] sqlx::Error),
}

/// Suggested defaults for a relocation form: what quantity could move,
/// in which unit, from where.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    /// Non-negative; zero when the engine finds no stock.
    pub quantity: Decimal,
    pub uom: String,
    /// The source location holding that stock, when one was found.
    pub from_location: Option<DbId>,
}

/// The inventory engine contract.
#[async_trait]
pub trait InventoryEngine: Send + Sync {
    /// Preview what a relocation of `product` within `warehouse_id`
    /// would imply: available quantity, unit of measure, and a default
    /// source location. Read-only; must not persist anything.
    async fn suggest(
        &self,
        conn: &mut PgConnection,
        product: &Product,
        warehouse_id: DbId,
        from_location: Option<DbId>,
    ) -> Result<Suggestion, EngineFailure>;

    /// Generate the stock moves for a batch of relocations, as one
    /// unit. Runs on the caller's transaction connection; a rejection
    /// must leave no moves behind once the caller rolls back.
    async fn confirm(
        &self,
        conn: &mut PgConnection,
        relocations: &[Relocation],
    ) -> Result<(), EngineFailure>;
}

/// Default engine: on-hand balances in `stock_levels`, movement log in
/// `stock_moves`.
#[derive(Debug, Default, Clone, Copy)]
pub struct StockLevelEngine;

impl StockLevelEngine {
    async fn on_hand(
        conn: &mut PgConnection,
        product_id: DbId,
        location_id: DbId,
    ) -> Result<Decimal, sqlx::Error> {
        let row: (Decimal,) = sqlx::query_as(
            "SELECT COALESCE(
                (SELECT quantity FROM stock_levels
                 WHERE product_id = $1 AND location_id = $2),
                0)",
        )
        .bind(product_id)
        .bind(location_id)
        .fetch_one(conn)
        .await?;
        Ok(row.0)
    }
}

#[async_trait]
impl InventoryEngine for StockLevelEngine {
    async fn suggest(
        &self,
        conn: &mut PgConnection,
        product: &Product,
        warehouse_id: DbId,
        from_location: Option<DbId>,
    ) -> Result<Suggestion, EngineFailure> {
        if let Some(location_id) = from_location {
            let quantity = Self::on_hand(conn, product.id, location_id).await?;
            return Ok(Suggestion {
                quantity: quantity.max(Decimal::ZERO),
                uom: product.uom.clone(),
                from_location: Some(location_id),
            });
        }

        // No candidate source: pick the storable location under the
        // warehouse holding the most stock of this product.
        let best: Option<(DbId, Decimal)> = sqlx::query_as(
            "SELECT sl.location_id, sl.quantity
             FROM stock_levels sl
             JOIN locations l ON l.id = sl.location_id
             WHERE sl.product_id = $1
               AND l.parent_id = $2
               AND l.kind NOT IN ('warehouse', 'view')
               AND sl.quantity > 0
             ORDER BY sl.quantity DESC, l.id
             LIMIT 1",
        )
        .bind(product.id)
        .bind(warehouse_id)
        .fetch_optional(conn)
        .await?;

        let (from_location, quantity) = match best {
            Some((location_id, quantity)) => (Some(location_id), quantity),
            None => (None, Decimal::ZERO),
        };

        Ok(Suggestion {
            quantity,
            uom: product.uom.clone(),
            from_location,
        })
    }

    async fn confirm(
        &self,
        conn: &mut PgConnection,
        relocations: &[Relocation],
    ) -> Result<(), EngineFailure> {
        // Validate the whole batch before touching any balance, so a
        // rejection happens without partial writes even before the
        // caller's rollback. Demand is accumulated per source so two
        // relocations draining the same shelf are checked together.
        let mut demanded: std::collections::HashMap<(DbId, DbId), Decimal> =
            std::collections::HashMap::new();
        for relocation in relocations {
            let key = (relocation.product_id, relocation.from_location_id);
            let demand = demanded.entry(key).or_insert(Decimal::ZERO);
            *demand += relocation.quantity;

            let available =
                Self::on_hand(conn, relocation.product_id, relocation.from_location_id).await?;
            if available < *demand {
                return Err(EngineError {
                    code: "insufficient_stock",
                    detail: format!(
                        "Insufficient stock for product {} at source location {}: \
                         {} on hand, {} requested",
                        relocation.product_id, relocation.from_location_id, available, demand
                    ),
                }
                .into());
            }
        }

        for relocation in relocations {
            sqlx::query(
                "UPDATE stock_levels
                 SET quantity = quantity - $1
                 WHERE product_id = $2 AND location_id = $3",
            )
            .bind(relocation.quantity)
            .bind(relocation.product_id)
            .bind(relocation.from_location_id)
            .execute(&mut *conn)
            .await?;

            sqlx::query(
                "INSERT INTO stock_levels (product_id, location_id, quantity)
                 VALUES ($1, $2, $3)
                 ON CONFLICT (product_id, location_id)
                 DO UPDATE SET quantity = stock_levels.quantity + EXCLUDED.quantity",
            )
            .bind(relocation.product_id)
            .bind(relocation.to_location_id)
            .bind(relocation.quantity)
            .execute(&mut *conn)
            .await?;

            sqlx::query(
                "INSERT INTO stock_moves
                    (relocation_id, product_id, from_location_id,
                     to_location_id, quantity, uom)
                 VALUES ($1, $2, $3, $4, $5, $6)",
            )
            .bind(relocation.id)
            .bind(relocation.product_id)
            .bind(relocation.from_location_id)
            .bind(relocation.to_location_id)
            .bind(relocation.quantity)
            .bind(&relocation.uom)
            .execute(&mut *conn)
            .await?;

            tracing::debug!(
                relocation_id = relocation.id,
                product_id = relocation.product_id,
                from_location_id = relocation.from_location_id,
                to_location_id = relocation.to_location_id,
                "Stock move generated"
            );
        }

        Ok(())
    }
}
