//! CSV import handlers.
//!
//! Each handler follows the same shape: read the uploaded file part,
//! decode rows, load the master-data and existing-record snapshots the
//! batch could touch, run the reconciliation pass, and persist the merged
//! entities unless the caller asked for a dry run (`commit=false`). The
//! field-level change report is returned either way.

use std::collections::BTreeSet;

use axum::extract::{Multipart, Query, State};
use axum::Json;
use chrono::Utc;
use serde::Deserialize;

use kinscreen_core::model::{ActivityProfile, Compound};
use kinscreen_core::reconcile::{
    reconcile_activity_profiles, reconcile_compounds, reconcile_kd_values,
};
use kinscreen_core::report::ImportReport;
use kinscreen_core::resolver::MasterData;
use kinscreen_core::rows::{normalize, ActivityProfileCsvRow, CompoundCsvRow, KdCsvRow};
use kinscreen_db::repositories::{ActivityProfileRepo, CompoundRepo, KinaseRepo};

use crate::csv::decode_rows;
use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

fn default_true() -> bool {
    true
}

/// Query parameters shared by all import endpoints.
///
/// `headerRow` controls whether the first CSV line is a header;
/// `commit=false` runs the full reconciliation without persisting.
#[derive(Debug, Deserialize)]
pub struct ImportParams {
    #[serde(rename = "headerRow", default = "default_true")]
    pub header_row: bool,
    #[serde(default = "default_true")]
    pub commit: bool,
}

/// PATCH /admin/api/activity-profiles -- import a percent-control CSV.
pub async fn import_activity_profiles(
    State(state): State<AppState>,
    Query(params): Query<ImportParams>,
    mut multipart: Multipart,
) -> AppResult<Json<DataResponse<ImportReport>>> {
    let bytes = read_file_part(&mut multipart).await?;
    let rows: Vec<ActivityProfileCsvRow> = decode_rows(&bytes, params.header_row)?;

    let refs = RowRefs::collect(rows.iter().map(|r| {
        (
            r.compound_name.as_deref(),
            r.discoverx_gene_symbol.as_deref(),
            r.entrez_gene_symbol.as_deref(),
        )
    }));
    let master = load_master_data(&state, &refs).await?;
    let existing = load_existing_profiles(&state, &refs).await?;

    let recon = reconcile_activity_profiles(&rows, &master, existing, Utc::now())?;

    if params.commit {
        let saved = ActivityProfileRepo::save_all(&state.pool, &recon.profiles).await?;
        tracing::info!(rows = rows.len(), saved, "Imported activity profiles");
    } else {
        tracing::info!(rows = rows.len(), "Previewed activity profile import");
    }

    Ok(Json(DataResponse { data: recon.report }))
}

/// PATCH /admin/api/kd-values -- import a Kd CSV.
pub async fn import_kd_values(
    State(state): State<AppState>,
    Query(params): Query<ImportParams>,
    mut multipart: Multipart,
) -> AppResult<Json<DataResponse<ImportReport>>> {
    let bytes = read_file_part(&mut multipart).await?;
    let rows: Vec<KdCsvRow> = decode_rows(&bytes, params.header_row)?;

    let refs = RowRefs::collect(rows.iter().map(|r| {
        (
            r.compound_name.as_deref(),
            r.discoverx_gene_symbol.as_deref(),
            r.entrez_gene_symbol.as_deref(),
        )
    }));
    let master = load_master_data(&state, &refs).await?;
    let existing = load_existing_profiles(&state, &refs).await?;

    let recon = reconcile_kd_values(&rows, &master, existing, Utc::now())?;

    if params.commit {
        let saved = ActivityProfileRepo::save_all(&state.pool, &recon.profiles).await?;
        tracing::info!(rows = rows.len(), saved, "Imported Kd values");
    } else {
        tracing::info!(rows = rows.len(), "Previewed Kd import");
    }

    Ok(Json(DataResponse { data: recon.report }))
}

/// PATCH /admin/api/compounds -- import a compound master-data CSV.
pub async fn import_compounds(
    State(state): State<AppState>,
    Query(params): Query<ImportParams>,
    mut multipart: Multipart,
) -> AppResult<Json<DataResponse<ImportReport>>> {
    let bytes = read_file_part(&mut multipart).await?;
    let rows: Vec<CompoundCsvRow> = decode_rows(&bytes, params.header_row)?;

    let lower_names = lower_compound_names(rows.iter().map(|r| r.compound_name.as_deref()));
    let existing: Vec<Compound> = CompoundRepo::find_by_names(&state.pool, &lower_names)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    let recon = reconcile_compounds(&rows, existing)?;

    if params.commit {
        let saved = CompoundRepo::save_all(&state.pool, &recon.compounds).await?;
        tracing::info!(rows = rows.len(), saved, "Imported compounds");
    } else {
        tracing::info!(rows = rows.len(), "Previewed compound import");
    }

    Ok(Json(DataResponse { data: recon.report }))
}

// ── Snapshot loading ─────────────────────────────────────────────────

/// Deduplicated references found in a batch of activity or Kd rows.
struct RowRefs {
    lower_compound_names: Vec<String>,
    discoverx_symbols: Vec<String>,
    entrez_symbols: Vec<String>,
}

impl RowRefs {
    fn collect<'a, I>(rows: I) -> Self
    where
        I: Iterator<Item = (Option<&'a str>, Option<&'a str>, Option<&'a str>)>,
    {
        let mut names = BTreeSet::new();
        let mut discoverx = BTreeSet::new();
        let mut entrez = BTreeSet::new();

        for (name, dx, ez) in rows {
            if let Some(name) = name.map(str::trim).filter(|s| !s.is_empty()) {
                names.insert(name.to_lowercase());
            }
            if let Some(dx) = dx.map(str::trim).filter(|s| !s.is_empty()) {
                discoverx.insert(dx.to_string());
            }
            if let Some(ez) = ez.map(str::trim).filter(|s| !s.is_empty()) {
                entrez.insert(ez.to_string());
            }
        }

        Self {
            lower_compound_names: names.into_iter().collect(),
            discoverx_symbols: discoverx.into_iter().collect(),
            entrez_symbols: entrez.into_iter().collect(),
        }
    }
}

fn lower_compound_names<'a, I>(names: I) -> Vec<String>
where
    I: Iterator<Item = Option<&'a str>>,
{
    let set: BTreeSet<String> = names
        .flat_map(|n| normalize(n.map(str::to_string)))
        .map(|n| n.to_lowercase())
        .collect();
    set.into_iter().collect()
}

async fn load_master_data(state: &AppState, refs: &RowRefs) -> AppResult<MasterData> {
    let compounds = CompoundRepo::find_by_names(&state.pool, &refs.lower_compound_names).await?;
    let kinases = KinaseRepo::find_by_symbols(
        &state.pool,
        &refs.discoverx_symbols,
        &refs.entrez_symbols,
    )
    .await?;

    Ok(MasterData::new(
        compounds.into_iter().map(|c| c.compound_name),
        kinases.into_iter().map(Into::into).collect(),
    ))
}

async fn load_existing_profiles(
    state: &AppState,
    refs: &RowRefs,
) -> AppResult<Vec<ActivityProfile>> {
    let rows =
        ActivityProfileRepo::find_for_compounds(&state.pool, &refs.lower_compound_names).await?;
    Ok(rows.into_iter().map(Into::into).collect())
}

/// Read the `file` part from a multipart upload.
async fn read_file_part(multipart: &mut Multipart) -> AppResult<Vec<u8>> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart upload: {e}")))?
    {
        if field.name() == Some("file") {
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(format!("Failed to read upload: {e}")))?;
            return Ok(bytes.to_vec());
        }
    }
    Err(AppError::BadRequest(
        "Missing 'file' part in multipart upload".to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_refs_dedup_and_lowercase_names() {
        let rows = [
            (Some("CompoundA"), Some("discoverxA"), Some("entrezA")),
            (Some("compounda"), Some("discoverxA"), None),
            (Some("  "), None, Some("entrezB")),
        ];
        let refs = RowRefs::collect(rows.into_iter());

        assert_eq!(refs.lower_compound_names, vec!["compounda"]);
        assert_eq!(refs.discoverx_symbols, vec!["discoverxA"]);
        assert_eq!(refs.entrez_symbols, vec!["entrezA", "entrezB"]);
    }

    #[test]
    fn test_import_params_default_to_header_and_commit() {
        let params: ImportParams = serde_json::from_str("{}").unwrap();
        assert!(params.header_row);
        assert!(params.commit);

        let params: ImportParams =
            serde_json::from_str(r#"{"headerRow": false, "commit": false}"#).unwrap();
        assert!(!params.header_row);
        assert!(!params.commit);
    }

    #[test]
    fn test_lower_compound_names_skips_blank() {
        let names = [Some("CompoundA"), Some(""), None, Some("compoundB")];
        assert_eq!(
            lower_compound_names(names.into_iter()),
            vec!["compounda", "compoundb"]
        );
    }
}
