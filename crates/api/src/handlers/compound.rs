//! Read handlers for compound master data.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;

use kinscreen_core::error::CoreError;
use kinscreen_db::models::CompoundRow;
use kinscreen_db::repositories::{clamp_limit, clamp_offset, CompoundRepo};

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for the compound listing.
#[derive(Debug, Deserialize)]
pub struct CompoundListParams {
    /// Case-insensitive name prefix filter. Without it, hidden compounds
    /// are excluded from the listing.
    pub name: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// GET /admin/api/compounds -- list compounds.
pub async fn list_compounds(
    State(state): State<AppState>,
    Query(params): Query<CompoundListParams>,
) -> AppResult<Json<DataResponse<Vec<CompoundRow>>>> {
    let compounds = CompoundRepo::list(
        &state.pool,
        params.name.as_deref(),
        clamp_limit(params.limit),
        clamp_offset(params.offset),
    )
    .await?;

    Ok(Json(DataResponse { data: compounds }))
}

/// GET /admin/api/compounds/{name} -- fetch one compound by name.
pub async fn get_compound(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> AppResult<Json<DataResponse<CompoundRow>>> {
    let compound = CompoundRepo::find_by_name(&state.pool, &name)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Compound",
            key: name,
        })?;

    Ok(Json(DataResponse { data: compound }))
}
