use axum::routing::get;
use axum::Router;

use crate::handlers::kinase;
use crate::state::AppState;

/// Kinase routes. Read-only: the panel is reference data.
pub fn router() -> Router<AppState> {
    Router::new().route("/kinases", get(kinase::list_kinases))
}
