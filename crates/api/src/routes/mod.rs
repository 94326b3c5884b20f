//! Route definitions.
//!
//! Each resource module owns its paths, including the PATCH import
//! endpoint where the resource has one. `admin_api_routes` assembles the
//! `/admin/api` tree; health stays at the root.

pub mod activity_profile;
pub mod compound;
pub mod health;
pub mod kinase;

use axum::Router;

use crate::state::AppState;

/// Assemble all routes mounted under `/admin/api`.
pub fn admin_api_routes() -> Router<AppState> {
    Router::new()
        .merge(compound::router())
        .merge(kinase::router())
        .merge(activity_profile::router())
}
