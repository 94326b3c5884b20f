//! Read handlers for kinase reference data.

use axum::extract::{Query, State};
use axum::Json;

use kinscreen_db::models::KinaseRow;
use kinscreen_db::repositories::{clamp_limit, clamp_offset, KinaseRepo};

use crate::error::AppResult;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /admin/api/kinases -- list the kinase panel.
pub async fn list_kinases(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Vec<KinaseRow>>>> {
    let kinases = KinaseRepo::list(
        &state.pool,
        clamp_limit(params.limit),
        clamp_offset(params.offset),
    )
    .await?;

    Ok(Json(DataResponse { data: kinases }))
}
