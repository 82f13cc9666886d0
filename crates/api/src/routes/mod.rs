pub mod health;
pub mod relocation;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /relocation                       list (GET)
/// /relocation/json/product          quantity/uom probe (POST)
/// /relocation/save                  create or edit a draft (POST)
/// /relocation/new                   creation form context (GET)
/// /relocation/edit/{id}             edit form context (GET)
/// /relocation/confirm               batch confirm (POST)
/// /relocation/delete                batch delete (POST)
/// /relocation/{id}                  detail (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/relocation", relocation::router())
}
