//! Location model. Locations are master data owned by the wider ERP;
//! this system only reads them.

use serde::Serialize;
use sqlx::FromRow;
use stockmove_core::types::{DbId, Timestamp};

/// A row from the `locations` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Location {
    pub id: DbId,
    pub name: String,
    /// `warehouse` and `view` are structural; everything else is storable.
    pub kind: String,
    pub parent_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
