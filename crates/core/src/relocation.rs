//! Relocation domain rules: lifecycle state, typed save input, and the
//! user-facing message builders shared by both response adapters.

use rust_decimal::Decimal;

use crate::error::CoreError;
use crate::types::DbId;

/// Structural location kinds that can never be a relocation endpoint.
/// A warehouse is a container, a view is a non-physical grouping;
/// everything else is storable.
pub const STRUCTURAL_LOCATION_KINDS: &[&str] = &["warehouse", "view"];

/// Returns `true` when a location of this kind may hold stock.
pub fn is_storable_kind(kind: &str) -> bool {
    !STRUCTURAL_LOCATION_KINDS.contains(&kind)
}

// ---------------------------------------------------------------------------
// Lifecycle state
// ---------------------------------------------------------------------------

/// Lifecycle state of a relocation. Transitions only move forward:
/// draft -> confirmed. Confirmed records are immutable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelocationState {
    Draft,
    Confirmed,
}

impl RelocationState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Confirmed => "confirmed",
        }
    }

    pub fn from_str(s: &str) -> Result<Self, CoreError> {
        match s {
            "draft" => Ok(Self::Draft),
            "confirmed" => Ok(Self::Confirmed),
            other => Err(CoreError::Internal(format!(
                "Unknown relocation state '{other}' in storage"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Typed save input
// ---------------------------------------------------------------------------

/// Typed input for the save (create-or-edit) operation.
///
/// The HTTP boundary accepts a JSON object, a JSON array of
/// `{name, value}` pairs, or an urlencoded form; all three are
/// converted into this struct before any core logic runs, so the core
/// never sees an untyped map. `quantity` stays raw here because its
/// classification (positive / zero / rejected) is the first validation
/// step and owns the parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelocationInput {
    /// Present in edit mode: the draft to overwrite.
    pub id: Option<DbId>,
    pub product: String,
    pub quantity: String,
    pub from_location: String,
    pub to_location: String,
    /// Confirm the record immediately after saving.
    pub confirm: bool,
}

impl RelocationInput {
    /// Build the typed input from `(name, value)` pairs, the shape the
    /// legacy client submits. Missing required keys are reported
    /// together; unknown keys are ignored.
    pub fn from_pairs<I, S1, S2>(pairs: I) -> Result<Self, CoreError>
    where
        I: IntoIterator<Item = (S1, S2)>,
        S1: AsRef<str>,
        S2: AsRef<str>,
    {
        let mut id = None;
        let mut product = None;
        let mut quantity = None;
        let mut from_location = None;
        let mut to_location = None;
        let mut confirm = false;

        for (name, value) in pairs {
            let value = value.as_ref();
            match name.as_ref() {
                "id" => {
                    let parsed: DbId = value.trim().parse().map_err(|_| {
                        CoreError::Validation(format!("Invalid relocation id '{value}'"))
                    })?;
                    id = Some(parsed);
                }
                "product" => product = Some(value.to_string()),
                "quantity" => quantity = Some(value.to_string()),
                "from_location" => from_location = Some(value.to_string()),
                "to_location" => to_location = Some(value.to_string()),
                "confirm" => confirm = is_truthy(value),
                _ => {}
            }
        }

        let mut missing = Vec::new();
        if product.is_none() {
            missing.push("product");
        }
        if quantity.is_none() {
            missing.push("quantity");
        }
        if from_location.is_none() {
            missing.push("from_location");
        }
        if to_location.is_none() {
            missing.push("to_location");
        }
        if !missing.is_empty() {
            return Err(CoreError::Validation(format!(
                "Missing required field(s): {}",
                missing.join(", ")
            )));
        }

        Ok(Self {
            id,
            product: product.unwrap_or_default(),
            quantity: quantity.unwrap_or_default(),
            from_location: from_location.unwrap_or_default(),
            to_location: to_location.unwrap_or_default(),
            confirm,
        })
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "on" | "yes"
    )
}

// ---------------------------------------------------------------------------
// Message builders
// ---------------------------------------------------------------------------

/// Advisory shown when the session lacks company/employee/warehouse.
pub fn preferences_incomplete_message() -> String {
    "Select an employee, a warehouse and a company in your preferences.".to_string()
}

/// Success summary after a draft is written.
pub fn saved_summary(product: &str, from: &str, to: &str, quantity: Decimal) -> String {
    format!(
        "Saved relocation \"{product}\" from \"{from}\" to \"{to}\" (Qty: {quantity})."
    )
}

/// Success message after an inline single-record confirm.
pub fn confirmed_inline_message(product: &str) -> String {
    format!("Confirmed relocation \"{product}\". A stock move was generated.")
}

/// Advisory for a zero quantity: nothing to do, nothing written.
pub fn quantity_zero_message() -> String {
    "Quantity is zero. No relocation was created.".to_string()
}

/// Advisory for a negative or unparseable quantity.
pub fn quantity_rejected_message(raw: &str) -> String {
    format!("Quantity '{raw}' must be a positive number. No relocation was created.")
}

/// Advisory naming location name(s) that did not resolve to a storable
/// location.
pub fn locations_not_found_message(names: &[&str]) -> String {
    format!("Location(s) not found: {}.", names.join(", "))
}

/// Advisory naming an unresolvable product.
pub fn product_not_found_message(name: &str) -> String {
    format!("Product \"{name}\" not found.")
}

/// Success message after a batch confirm.
pub fn confirmed_batch_message(total: usize) -> String {
    format!("Confirmed {total} relocation(s); stock moves were generated.")
}

/// Success message after a batch delete.
pub fn deleted_batch_message(total: usize) -> String {
    format!("Deleted {total} draft relocation(s).")
}

/// Advisory when the draft filter leaves nothing to act on.
pub fn nothing_to_do_message(operation: &str) -> String {
    format!("No draft relocations matched the request. Nothing to {operation}.")
}

/// Danger message surfacing an engine rejection verbatim.
pub fn engine_failure_message(operation: &str, detail: &str) -> String {
    format!("Error when trying to {operation} relocations: {detail}")
}
