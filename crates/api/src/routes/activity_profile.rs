use axum::routing::{get, patch};
use axum::Router;

use crate::handlers::{activity_profile, import};
use crate::state::AppState;

/// Activity-profile routes: listing plus the two CSV imports that feed
/// the table (percent-control rows and Kd rows).
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/activity-profiles",
            get(activity_profile::list_activity_profiles)
                .patch(import::import_activity_profiles),
        )
        .route("/kd-values", patch(import::import_kd_values))
}
