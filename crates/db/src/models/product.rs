//! Product model. Products are master data owned by the wider ERP;
//! this system only reads them.

use serde::Serialize;
use sqlx::FromRow;
use stockmove_core::types::{DbId, Timestamp};

/// A row from the `products` table. `name` is the display name used as
/// the sole lookup key.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Product {
    pub id: DbId,
    pub name: String,
    /// Default unit of measure, copied onto relocations at save time.
    pub uom: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
