use axum::routing::get;
use axum::Router;

use crate::handlers::{compound, import};
use crate::state::AppState;

/// Compound routes: listing, single lookup, and the CSV import.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/compounds",
            get(compound::list_compounds).patch(import::import_compounds),
        )
        .route("/compounds/{name}", get(compound::get_compound))
}
