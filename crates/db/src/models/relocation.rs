//! Relocation row model and write DTOs.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;
use stockmove_core::types::{DbId, Timestamp};

/// A row from the `relocations` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Relocation {
    pub id: DbId,
    pub company_id: DbId,
    pub employee_id: DbId,
    pub warehouse_id: DbId,
    pub product_id: DbId,
    pub uom: String,
    pub quantity: Decimal,
    pub from_location_id: DbId,
    pub to_location_id: DbId,
    pub planned_date: NaiveDate,
    /// `draft` or `confirmed`; gated in SQL, parsed via
    /// `RelocationState` where the domain needs it.
    pub state: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting a new draft. Ownership fields come from the acting
/// context, never from client input.
#[derive(Debug, Clone)]
pub struct CreateRelocation {
    pub company_id: DbId,
    pub employee_id: DbId,
    pub warehouse_id: DbId,
    pub product_id: DbId,
    pub uom: String,
    pub quantity: Decimal,
    pub from_location_id: DbId,
    pub to_location_id: DbId,
    pub planned_date: NaiveDate,
}

/// DTO for the edit-by-id re-save: a full overwrite of the four
/// user-editable fields (plus the uom that follows the product).
#[derive(Debug, Clone)]
pub struct UpdateDraftRelocation {
    pub product_id: DbId,
    pub uom: String,
    pub quantity: Decimal,
    pub from_location_id: DbId,
    pub to_location_id: DbId,
}
