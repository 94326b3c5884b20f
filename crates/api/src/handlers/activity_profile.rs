//! Read handlers for activity profiles.

use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use kinscreen_core::error::CoreError;
use kinscreen_db::models::ActivityProfileRow;
use kinscreen_db::repositories::{clamp_limit, clamp_offset, ActivityProfileRepo, CompoundRepo};

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for the activity-profile listing.
#[derive(Debug, Deserialize)]
pub struct ActivityProfileListParams {
    /// Restrict to one compound (case-insensitive exact name). Filtering
    /// on a compound that does not exist is a client error, not an empty
    /// result.
    pub compound: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// GET /admin/api/activity-profiles -- list activity profiles, newest first.
pub async fn list_activity_profiles(
    State(state): State<AppState>,
    Query(params): Query<ActivityProfileListParams>,
) -> AppResult<Json<DataResponse<Vec<ActivityProfileRow>>>> {
    if let Some(compound) = params.compound.as_deref() {
        if CompoundRepo::find_by_name(&state.pool, compound)
            .await?
            .is_none()
        {
            return Err(
                CoreError::Validation(format!("unknown compound '{compound}'")).into(),
            );
        }
    }

    let profiles = ActivityProfileRepo::list(
        &state.pool,
        params.compound.as_deref(),
        clamp_limit(params.limit),
        clamp_offset(params.offset),
    )
    .await?;

    Ok(Json(DataResponse { data: profiles }))
}
