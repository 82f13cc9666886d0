use axum::routing::{get, post};
use axum::Router;

use crate::handlers::relocation;
use crate::state::AppState;

/// Mount the relocation routes (nested under `/api/v1/relocation`).
///
/// Fixed segments are registered before the `{id}` catch-all so
/// `/relocation/new` never parses as a detail lookup.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(relocation::list))
        .route("/json/product", post(relocation::product_probe))
        .route("/save", post(relocation::save))
        .route("/new", get(relocation::new_context))
        .route("/edit/{id}", get(relocation::edit_context))
        .route("/confirm", post(relocation::confirm_batch))
        .route("/delete", post(relocation::delete_batch))
        .route("/{id}", get(relocation::detail))
}
