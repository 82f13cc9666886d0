//! Handlers for the relocation surface: probe, save, batch workflow,
//! form context, detail and list.

use axum::extract::{Path, State};
use axum::response::{IntoResponse, Redirect, Response};
use axum::Json;
use chrono::Utc;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use serde_json::json;
use stockmove_core::context::BoundContext;
use stockmove_core::error::CoreError;
use stockmove_core::outcome::{OperationOutcome, OutcomeMessage};
use stockmove_core::quantity::{classify_quantity, QuantityCheck};
use stockmove_core::relocation::{
    confirmed_batch_message, confirmed_inline_message, deleted_batch_message,
    engine_failure_message, locations_not_found_message, nothing_to_do_message,
    preferences_incomplete_message, product_not_found_message, quantity_rejected_message,
    quantity_zero_message, saved_summary,
};
use stockmove_core::types::DbId;
use stockmove_db::models::location::Location;
use stockmove_db::models::product::Product;
use stockmove_db::models::relocation::{CreateRelocation, Relocation, UpdateDraftRelocation};
use stockmove_db::repositories::{LocationRepo, ProductRepo, RelocationRepo};
use stockmove_engine::EngineFailure;

use crate::error::{AppError, AppResult};
use crate::extract::{BatchPayload, ResponseMode, SavePayload};
use crate::middleware::auth::AuthUser;
use crate::response::{DataResponse, OutcomeResponse};
use crate::state::AppState;

/// Redirect target for the interactive flow.
const LIST_PATH: &str = "/api/v1/relocation";

// ---------------------------------------------------------------------------
// Product probe
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct ProbeRequest {
    pub product: String,
    pub from_location: Option<String>,
}

/// `POST /api/v1/relocation/json/product`
///
/// Preview the quantity available for a product, its unit of measure,
/// and a suggested source location. Degrades to empty `results` when
/// the product (or any warehouse) cannot be resolved; never an error.
pub async fn product_probe(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(request): Json<ProbeRequest>,
) -> AppResult<Json<serde_json::Value>> {
    let warehouse_id = match auth.context.warehouse {
        Some(id) => Some(id),
        None => LocationRepo::find_first_warehouse(&state.pool)
            .await?
            .map(|w| w.id),
    };
    let Some(warehouse_id) = warehouse_id else {
        return Ok(Json(json!({ "results": {} })));
    };

    let Some(product) = ProductRepo::find_by_name(&state.pool, &request.product).await? else {
        return Ok(Json(json!({ "results": {} })));
    };

    // An unresolvable source name is not fatal here: the engine then
    // picks the best-stocked location under the warehouse.
    let from = match &request.from_location {
        Some(name) => LocationRepo::find_storable_by_name(&state.pool, name).await?,
        None => None,
    };

    let mut conn = state.pool.acquire().await?;
    let suggestion = state
        .engine
        .suggest(&mut *conn, &product, warehouse_id, from.as_ref().map(|l| l.id))
        .await?;
    drop(conn);

    let from_location_name = match suggestion.from_location {
        Some(id) => match from {
            Some(location) if location.id == id => Some(location.name),
            _ => LocationRepo::find_by_id(&state.pool, id).await?.map(|l| l.name),
        },
        None => None,
    };

    // The legacy probe reported whole units.
    let quantity = suggestion.quantity.trunc().to_i64().unwrap_or(0);

    Ok(Json(json!({
        "results": {
            "quantity": quantity,
            "unit_of_measure": suggestion.uom,
            "from_location": from_location_name,
        }
    })))
}

// ---------------------------------------------------------------------------
// Save (create or edit)
// ---------------------------------------------------------------------------

/// `POST /api/v1/relocation/save`
///
/// Create a draft, or overwrite one when the body carries an `id`.
/// Validation failures come back as advisories, never HTTP errors;
/// only an edit against a missing/confirmed record is a 404.
pub async fn save(
    State(state): State<AppState>,
    auth: AuthUser,
    payload: SavePayload,
) -> AppResult<Response> {
    let mut outcome = OperationOutcome::new();

    let Some(bound) = auth.context.bind() else {
        outcome.push_warning(preferences_incomplete_message());
        return respond(&state, &auth, payload.mode, outcome, false);
    };

    let input = payload.input;

    let quantity = match classify_quantity(&input.quantity) {
        QuantityCheck::Positive(q) => q,
        QuantityCheck::Zero => {
            outcome.push_warning(quantity_zero_message());
            return respond(&state, &auth, payload.mode, outcome, true);
        }
        QuantityCheck::Rejected => {
            outcome.push_warning(quantity_rejected_message(&input.quantity));
            return respond(&state, &auth, payload.mode, outcome, true);
        }
    };

    let (from, to) =
        LocationRepo::resolve_pair(&state.pool, &input.from_location, &input.to_location).await?;
    let mut missing: Vec<&str> = Vec::new();
    if from.is_none() {
        missing.push(input.from_location.as_str());
    }
    // Identical names share one lookup result; list the name once.
    if to.is_none() && input.to_location != input.from_location {
        missing.push(input.to_location.as_str());
    }
    if !missing.is_empty() {
        outcome.push_warning(locations_not_found_message(&missing));
    }

    let product = ProductRepo::find_by_name(&state.pool, &input.product).await?;
    if product.is_none() {
        outcome.push_warning(product_not_found_message(&input.product));
    }

    let (Some(from), Some(to), Some(product)) = (from, to, product) else {
        return respond(&state, &auth, payload.mode, outcome, true);
    };

    let record = match input.id {
        Some(id) => {
            let update = UpdateDraftRelocation {
                product_id: product.id,
                uom: product.uom.clone(),
                quantity,
                from_location_id: from.id,
                to_location_id: to.id,
            };
            RelocationRepo::update_draft(&state.pool, id, &update)
                .await?
                .ok_or(AppError::Core(CoreError::NotFound {
                    entity: "Relocation",
                    id,
                }))?
        }
        None => {
            create_draft(&state, &bound, &product, &from, &to, quantity).await?
        }
    };

    outcome.push_success(saved_summary(&product.name, &from.name, &to.name, quantity));

    if input.confirm {
        // The confirm runs in its own transaction: a rejection leaves
        // the just-committed draft intact. Same one-record-batch
        // semantics as the batch endpoint, including its scope.
        let scope = state.config.batch_scope.filter_employee(&auth.context);
        match run_confirm(&state, &[record.id], scope).await? {
            BatchResult::Done(_) => {
                outcome.push_success(confirmed_inline_message(&product.name));
            }
            BatchResult::NothingToDo => {
                outcome.push_warning(nothing_to_do_message("confirm"));
            }
            BatchResult::Rejected(detail) => {
                outcome.push_danger(engine_failure_message("confirm", &detail));
            }
        }
    }

    respond(&state, &auth, payload.mode, outcome, true)
}

/// Insert a new draft, pre-filling the unit of measure through the
/// inventory engine's suggestion.
async fn create_draft(
    state: &AppState,
    bound: &BoundContext,
    product: &Product,
    from: &Location,
    to: &Location,
    quantity: rust_decimal::Decimal,
) -> AppResult<Relocation> {
    let mut conn = state.pool.acquire().await?;
    let suggestion = state
        .engine
        .suggest(&mut *conn, product, bound.warehouse, Some(from.id))
        .await?;
    drop(conn);

    let create = CreateRelocation {
        company_id: bound.company,
        employee_id: bound.employee,
        warehouse_id: bound.warehouse,
        product_id: product.id,
        uom: suggestion.uom,
        quantity,
        from_location_id: from.id,
        to_location_id: to.id,
        planned_date: Utc::now().date_naive(),
    };
    Ok(RelocationRepo::create(&state.pool, &create).await?)
}

// ---------------------------------------------------------------------------
// Batch workflow
// ---------------------------------------------------------------------------

/// Outcome of one batch pass over the draft filter.
enum BatchResult {
    /// The batch committed; carries the affected row count.
    Done(u64),
    /// The draft filter left nothing to act on.
    NothingToDo,
    /// The engine rejected the batch; nothing was written.
    Rejected(String),
}

/// Confirm the drafts among `ids` and generate their stock moves, all
/// in one transaction. The draft filter is re-evaluated under row
/// locks, so a concurrent confirm/delete cannot double-process.
async fn run_confirm(
    state: &AppState,
    ids: &[DbId],
    employee_id: Option<DbId>,
) -> AppResult<BatchResult> {
    let mut tx = state.pool.begin().await?;

    let drafts = RelocationRepo::lock_drafts(&mut *tx, ids, employee_id).await?;
    if drafts.is_empty() {
        tx.rollback().await?;
        return Ok(BatchResult::NothingToDo);
    }

    match state.engine.confirm(&mut *tx, &drafts).await {
        Ok(()) => {
            let draft_ids: Vec<DbId> = drafts.iter().map(|r| r.id).collect();
            let count = RelocationRepo::confirm_all(&mut *tx, &draft_ids).await?;
            tx.commit().await?;
            Ok(BatchResult::Done(count))
        }
        Err(EngineFailure::Rejected(rejection)) => {
            tx.rollback().await?;
            Ok(BatchResult::Rejected(rejection.detail))
        }
        Err(EngineFailure::Db(e)) => Err(AppError::Database(e)),
    }
}

/// Delete the drafts among `ids` in one transaction, under the same
/// re-filter-and-lock discipline as confirm.
async fn run_delete(
    state: &AppState,
    ids: &[DbId],
    employee_id: Option<DbId>,
) -> AppResult<BatchResult> {
    let mut tx = state.pool.begin().await?;

    let drafts = RelocationRepo::lock_drafts(&mut *tx, ids, employee_id).await?;
    if drafts.is_empty() {
        tx.rollback().await?;
        return Ok(BatchResult::NothingToDo);
    }

    let draft_ids: Vec<DbId> = drafts.iter().map(|r| r.id).collect();
    let count = RelocationRepo::delete_drafts(&mut *tx, &draft_ids).await?;
    tx.commit().await?;
    Ok(BatchResult::Done(count))
}

/// `POST /api/v1/relocation/confirm`
///
/// Confirm the drafts among the submitted ids. Non-draft, unknown and
/// (under the default scope) foreign-employee ids are silently skipped.
pub async fn confirm_batch(
    State(state): State<AppState>,
    auth: AuthUser,
    payload: BatchPayload,
) -> AppResult<Response> {
    let mut outcome = OperationOutcome::new();
    if auth.context.bind().is_none() {
        outcome.push_warning(preferences_incomplete_message());
        return respond(&state, &auth, payload.mode, outcome, false);
    }
    let employee_id = state.config.batch_scope.filter_employee(&auth.context);

    match run_confirm(&state, &payload.ids, employee_id).await? {
        BatchResult::Done(count) => {
            tracing::info!(user_id = auth.user_id, count, "confirmed relocation batch");
            outcome.push_success(confirmed_batch_message(count as usize));
        }
        BatchResult::NothingToDo => {
            outcome.push_warning(nothing_to_do_message("confirm"));
        }
        BatchResult::Rejected(detail) => {
            outcome.push_danger(engine_failure_message("confirm", &detail));
        }
    }

    respond(&state, &auth, payload.mode, outcome, true)
}

/// `POST /api/v1/relocation/delete`
///
/// Delete the drafts among the submitted ids, with the same skip rules
/// as confirm.
pub async fn delete_batch(
    State(state): State<AppState>,
    auth: AuthUser,
    payload: BatchPayload,
) -> AppResult<Response> {
    let mut outcome = OperationOutcome::new();
    if auth.context.bind().is_none() {
        outcome.push_warning(preferences_incomplete_message());
        return respond(&state, &auth, payload.mode, outcome, false);
    }
    let employee_id = state.config.batch_scope.filter_employee(&auth.context);

    match run_delete(&state, &payload.ids, employee_id).await? {
        BatchResult::Done(count) => {
            tracing::info!(user_id = auth.user_id, count, "deleted relocation batch");
            outcome.push_success(deleted_batch_message(count as usize));
        }
        BatchResult::NothingToDo => {
            outcome.push_warning(nothing_to_do_message("delete"));
        }
        BatchResult::Rejected(detail) => {
            outcome.push_danger(engine_failure_message("delete", &detail));
        }
    }

    respond(&state, &auth, payload.mode, outcome, true)
}

// ---------------------------------------------------------------------------
// Form context, detail, list
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct NewContext {
    pub locations: Vec<Location>,
    pub default_to_location: Option<Location>,
}

/// `GET /api/v1/relocation/new`
///
/// Context for the creation form: the storable locations and a default
/// destination under the acting warehouse.
pub async fn new_context(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<DataResponse<NewContext>>> {
    let locations = LocationRepo::list_storable(&state.pool).await?;
    let default_to_location = match auth.context.warehouse {
        Some(warehouse_id) => LocationRepo::default_to_location(&state.pool, warehouse_id).await?,
        None => None,
    };
    Ok(Json(DataResponse::new(NewContext {
        locations,
        default_to_location,
    })))
}

#[derive(Debug, Serialize)]
pub struct EditContext {
    pub locations: Vec<Location>,
    pub relocation: Relocation,
}

/// `GET /api/v1/relocation/edit/{id}`
///
/// Context for the edit form. Confirmed records are invisible here:
/// missing and non-draft ids both answer 404.
pub async fn edit_context(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<EditContext>>> {
    let relocation = RelocationRepo::find_draft_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Relocation",
            id,
        }))?;
    let locations = LocationRepo::list_storable(&state.pool).await?;
    Ok(Json(DataResponse::new(EditContext {
        locations,
        relocation,
    })))
}

/// `GET /api/v1/relocation/{id}`
pub async fn detail(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Relocation>>> {
    let relocation = RelocationRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Relocation",
            id,
        }))?;
    Ok(Json(DataResponse::new(relocation)))
}

#[derive(Debug, Serialize)]
pub struct ListResponse {
    pub relocations: Vec<Relocation>,
    /// Flash messages queued by prior interactive operations, drained
    /// on delivery.
    pub messages: Vec<OutcomeMessage>,
}

/// `GET /api/v1/relocation`
///
/// Relocations planned today or later, limited to the acting employee
/// when one is bound. Also delivers (and clears) the user's queued
/// flash messages.
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<DataResponse<ListResponse>>> {
    let today = Utc::now().date_naive();
    let relocations =
        RelocationRepo::list_from_date(&state.pool, today, auth.context.employee).await?;
    let messages = state.flash.drain(auth.user_id);
    Ok(Json(DataResponse::new(ListResponse {
        relocations,
        messages,
    })))
}

// ---------------------------------------------------------------------------
// Outcome delivery
// ---------------------------------------------------------------------------

/// Deliver an operation outcome in the negotiated mode: a JSON envelope
/// with grouped messages, or flash-queue-then-redirect for forms.
fn respond(
    state: &AppState,
    auth: &AuthUser,
    mode: ResponseMode,
    outcome: OperationOutcome,
    result: bool,
) -> AppResult<Response> {
    match mode {
        ResponseMode::Json => {
            let (success, warning) = outcome.into_groups();
            Ok(Json(OutcomeResponse::new(result, success, warning)).into_response())
        }
        ResponseMode::Interactive => {
            state.flash.push_all(auth.user_id, outcome.into_messages());
            Ok(Redirect::to(LIST_PATH).into_response())
        }
    }
}
