//! The reconciliation engine.
//!
//! Resolves each decoded CSV row against master data, matches it to an
//! existing record via its composite natural key, computes a field-level
//! non-destructive merge, and accumulates a per-field change report.
//!
//! The pass is pure: it consumes an immutable snapshot of existing records
//! plus an already-decoded row sequence and produces new values without
//! touching shared state. Duplicate keys within one batch merge
//! sequentially against the evolving in-memory state (last write wins),
//! with each row's report still reflecting the true before-state at the
//! time that row was processed.

use std::collections::HashMap;

use crate::error::CoreError;
use crate::model::{ActivityProfile, Compound};
use crate::report::{
    json_opt, json_val, FieldStatus, ImportReport, FIELD_CHEMOTYPE, FIELD_COMPOUND_CONCENTRATION,
    FIELD_COMPOUND_NAME, FIELD_DISCOVERX_GENE_SYMBOL, FIELD_ENTREZ_GENE_SYMBOL, FIELD_KD,
    FIELD_PERCENT_CONTROL, FIELD_PRIMARY_REFERENCE, FIELD_PRIMARY_REFERENCE_URL, FIELD_S10,
    FIELD_SMILES, FIELD_SOURCE,
};
use crate::resolver::ReferenceResolver;
use crate::rows::{normalize, ActivityProfileCsvRow, CompoundCsvRow, KdCsvRow};
use crate::types::Timestamp;

// ── Composite key ────────────────────────────────────────────────────

/// The composite natural key identifying one activity profile:
/// (compound name lower-cased, DiscoveRx gene symbol).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProfileKey {
    pub compound_name: String,
    pub discoverx_gene_symbol: String,
}

impl ProfileKey {
    pub fn new(compound_name: &str, discoverx_gene_symbol: &str) -> Self {
        Self {
            compound_name: compound_name.to_lowercase(),
            discoverx_gene_symbol: discoverx_gene_symbol.to_string(),
        }
    }

    pub fn of(profile: &ActivityProfile) -> Self {
        Self::new(&profile.compound_name, &profile.discoverx_gene_symbol)
    }
}

// ── Results ──────────────────────────────────────────────────────────

/// Outcome of reconciling one batch of activity-profile or Kd rows.
///
/// `profiles` holds the post-merge state of every record the batch
/// touched, in first-seen key order; this is what the commit gate
/// persists. `report` is ordered by input row.
#[derive(Debug, Clone)]
pub struct Reconciliation {
    pub profiles: Vec<ActivityProfile>,
    pub report: ImportReport,
}

/// Outcome of reconciling one batch of compound rows.
#[derive(Debug, Clone)]
pub struct CompoundReconciliation {
    pub compounds: Vec<Compound>,
    pub report: ImportReport,
}

// ── Internal row form ────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RowKind {
    Activity,
    Kd,
}

/// A row after blank normalization, compound validation, and kinase
/// resolution (gene-symbol cross-fill applied).
#[derive(Debug, Clone)]
struct ResolvedRow {
    kind: RowKind,
    compound_name: String,
    discoverx_gene_symbol: String,
    entrez_gene_symbol: Option<String>,
    percent_control: Option<f64>,
    compound_concentration: Option<i32>,
    kd: Option<f64>,
    kd_qualifier: Option<String>,
}

// ── Public operations ────────────────────────────────────────────────

/// Reconcile a batch of activity-profile rows against an existing snapshot.
///
/// Fails the entire batch (no partial result) if any row references an
/// unknown compound or kinase.
pub fn reconcile_activity_profiles<R: ReferenceResolver>(
    rows: &[ActivityProfileCsvRow],
    resolver: &R,
    existing: Vec<ActivityProfile>,
    now: Timestamp,
) -> Result<Reconciliation, CoreError> {
    let resolved = rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            resolve_row(
                resolver,
                i,
                RowKind::Activity,
                row.compound_name.clone(),
                row.discoverx_gene_symbol.clone(),
                row.entrez_gene_symbol.clone(),
                row.percent_control,
                row.compound_concentration,
                None,
                None,
            )
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(merge_rows(resolved, existing, now))
}

/// Reconcile a batch of Kd rows against an existing snapshot.
///
/// Kd rows merge both the Kd value and its qualifier, but only the `kd`
/// field appears in the report after the three identity/gene fields.
pub fn reconcile_kd_values<R: ReferenceResolver>(
    rows: &[KdCsvRow],
    resolver: &R,
    existing: Vec<ActivityProfile>,
    now: Timestamp,
) -> Result<Reconciliation, CoreError> {
    let resolved = rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            resolve_row(
                resolver,
                i,
                RowKind::Kd,
                row.compound_name.clone(),
                row.discoverx_gene_symbol.clone(),
                row.entrez_gene_symbol.clone(),
                None,
                None,
                row.kd,
                row.kd_qualifier.clone(),
            )
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(merge_rows(resolved, existing, now))
}

/// Reconcile a batch of compound rows against existing compound master data.
///
/// Unlike activity-profile imports, unknown compounds are created here;
/// this is how compounds enter the system.
pub fn reconcile_compounds(
    rows: &[CompoundCsvRow],
    existing: Vec<Compound>,
) -> Result<CompoundReconciliation, CoreError> {
    let mut current: HashMap<String, Compound> = existing
        .into_iter()
        .map(|c| (c.compound_name.to_lowercase(), c))
        .collect();
    let mut touched: Vec<String> = Vec::new();
    let mut report = ImportReport::default();

    for (i, row) in rows.iter().enumerate() {
        let name = normalize(row.compound_name.clone())
            .ok_or_else(|| CoreError::Validation(format!("row {}: missing compound name", i + 1)))?;
        let key = name.to_lowercase();

        let statuses = match current.get(&key) {
            Some(prior) => {
                let (merged, statuses) = merge_compound(prior, row);
                current.insert(key.clone(), merged);
                statuses
            }
            None => {
                let (created, statuses) = create_compound(&name, row);
                current.insert(key.clone(), created);
                statuses
            }
        };

        if !touched.contains(&key) {
            touched.push(key);
        }
        report.field_statuses.push(statuses);
    }

    let compounds = touched
        .into_iter()
        .filter_map(|key| current.remove(&key))
        .collect();

    Ok(CompoundReconciliation { compounds, report })
}

// ── Row resolution ───────────────────────────────────────────────────

#[allow(clippy::too_many_arguments)]
fn resolve_row<R: ReferenceResolver>(
    resolver: &R,
    index: usize,
    kind: RowKind,
    compound_name: Option<String>,
    discoverx_gene_symbol: Option<String>,
    entrez_gene_symbol: Option<String>,
    percent_control: Option<f64>,
    compound_concentration: Option<i32>,
    kd: Option<f64>,
    kd_qualifier: Option<String>,
) -> Result<ResolvedRow, CoreError> {
    let row_num = index + 1;

    let compound_name = normalize(compound_name)
        .ok_or_else(|| CoreError::Validation(format!("row {row_num}: missing compound name")))?;
    if !resolver.compound_exists(&compound_name) {
        return Err(CoreError::Validation(format!(
            "row {row_num}: unknown compound '{compound_name}'"
        )));
    }

    let discoverx = normalize(discoverx_gene_symbol);
    let entrez = normalize(entrez_gene_symbol);

    // Resolve by DiscoveRx symbol first, falling back to Entrez. The
    // resolved kinase supplies whichever gene symbol the row omitted.
    let kinase = discoverx
        .as_deref()
        .and_then(|s| resolver.kinase_by_discoverx(s))
        .or_else(|| entrez.as_deref().and_then(|s| resolver.kinase_by_entrez(s)))
        .ok_or_else(|| {
            CoreError::Validation(format!(
                "row {row_num}: unknown kinase (discoverx: {:?}, entrez: {:?})",
                discoverx, entrez
            ))
        })?;

    let discoverx_gene_symbol =
        discoverx.unwrap_or_else(|| kinase.discoverx_gene_symbol.clone());
    let entrez_gene_symbol = entrez.or_else(|| Some(kinase.entrez_gene_symbol.clone()));

    Ok(ResolvedRow {
        kind,
        compound_name,
        discoverx_gene_symbol,
        entrez_gene_symbol,
        percent_control,
        compound_concentration,
        kd,
        kd_qualifier: normalize(kd_qualifier),
    })
}

// ── Merge ────────────────────────────────────────────────────────────

fn merge_rows(
    rows: Vec<ResolvedRow>,
    existing: Vec<ActivityProfile>,
    now: Timestamp,
) -> Reconciliation {
    let mut current: HashMap<ProfileKey, ActivityProfile> = existing
        .into_iter()
        .map(|p| (ProfileKey::of(&p), p))
        .collect();
    let mut touched: Vec<ProfileKey> = Vec::new();
    let mut report = ImportReport::default();

    for row in rows {
        let key = ProfileKey::new(&row.compound_name, &row.discoverx_gene_symbol);

        let statuses = match current.get(&key) {
            Some(prior) => {
                let (merged, statuses) = merge_profile(prior, &row);
                current.insert(key.clone(), merged);
                statuses
            }
            None => {
                let (created, statuses) = create_profile(&row, now);
                current.insert(key.clone(), created);
                statuses
            }
        };

        if !touched.contains(&key) {
            touched.push(key);
        }
        report.field_statuses.push(statuses);
    }

    let profiles = touched
        .into_iter()
        .filter_map(|key| current.remove(&key))
        .collect();

    Reconciliation { profiles, report }
}

/// Field-level merge of one row into a matched profile. Present row values
/// overwrite; absent ones retain the existing value. Every tracked field
/// gets a report entry either way.
fn merge_profile(prior: &ActivityProfile, row: &ResolvedRow) -> (ActivityProfile, Vec<FieldStatus>) {
    let mut merged = prior.clone();

    // Identity fields: part of the matching key, never modified.
    let mut statuses = vec![
        FieldStatus::new(
            FIELD_COMPOUND_NAME,
            json_val(&prior.compound_name),
            json_val(&prior.compound_name),
        ),
        FieldStatus::new(
            FIELD_DISCOVERX_GENE_SYMBOL,
            json_val(&prior.discoverx_gene_symbol),
            json_val(&prior.discoverx_gene_symbol),
        ),
    ];

    let old_entrez = prior.entrez_gene_symbol.clone();
    if row.entrez_gene_symbol.is_some() {
        merged.entrez_gene_symbol = row.entrez_gene_symbol.clone();
    }
    statuses.push(FieldStatus::new(
        FIELD_ENTREZ_GENE_SYMBOL,
        json_opt(&old_entrez),
        json_opt(&merged.entrez_gene_symbol),
    ));

    match row.kind {
        RowKind::Activity => {
            let old_pc = prior.percent_control;
            if row.percent_control.is_some() {
                merged.percent_control = row.percent_control;
            }
            statuses.push(FieldStatus::new(
                FIELD_PERCENT_CONTROL,
                json_opt(&old_pc),
                json_opt(&merged.percent_control),
            ));

            let old_conc = prior.compound_concentration;
            if row.compound_concentration.is_some() {
                merged.compound_concentration = row.compound_concentration;
            }
            statuses.push(FieldStatus::new(
                FIELD_COMPOUND_CONCENTRATION,
                json_opt(&old_conc),
                json_opt(&merged.compound_concentration),
            ));
        }
        RowKind::Kd => {
            let old_kd = prior.kd;
            if row.kd.is_some() {
                merged.kd = row.kd;
            }
            if row.kd_qualifier.is_some() {
                merged.kd_qualifier = row.kd_qualifier.clone();
            }
            statuses.push(FieldStatus::new(FIELD_KD, json_opt(&old_kd), json_opt(&merged.kd)));
        }
    }

    (merged, statuses)
}

/// Build a brand-new profile from a row with no existing match. Every
/// populated field gets a report entry with an absent old value.
fn create_profile(row: &ResolvedRow, now: Timestamp) -> (ActivityProfile, Vec<FieldStatus>) {
    let created = ActivityProfile {
        id: None,
        compound_name: row.compound_name.clone(),
        discoverx_gene_symbol: row.discoverx_gene_symbol.clone(),
        entrez_gene_symbol: row.entrez_gene_symbol.clone(),
        percent_control: row.percent_control,
        compound_concentration: row.compound_concentration,
        kd: row.kd,
        kd_qualifier: row.kd_qualifier.clone(),
        create_date: now,
    };

    let mut statuses = vec![
        FieldStatus::new(FIELD_COMPOUND_NAME, None, json_val(&created.compound_name)),
        FieldStatus::new(
            FIELD_DISCOVERX_GENE_SYMBOL,
            None,
            json_val(&created.discoverx_gene_symbol),
        ),
    ];
    if created.entrez_gene_symbol.is_some() {
        statuses.push(FieldStatus::new(
            FIELD_ENTREZ_GENE_SYMBOL,
            None,
            json_opt(&created.entrez_gene_symbol),
        ));
    }
    match row.kind {
        RowKind::Activity => {
            if created.percent_control.is_some() {
                statuses.push(FieldStatus::new(
                    FIELD_PERCENT_CONTROL,
                    None,
                    json_opt(&created.percent_control),
                ));
            }
            if created.compound_concentration.is_some() {
                statuses.push(FieldStatus::new(
                    FIELD_COMPOUND_CONCENTRATION,
                    None,
                    json_opt(&created.compound_concentration),
                ));
            }
        }
        RowKind::Kd => {
            if created.kd.is_some() {
                statuses.push(FieldStatus::new(FIELD_KD, None, json_opt(&created.kd)));
            }
        }
    }

    (created, statuses)
}

// ── Compound merge ───────────────────────────────────────────────────

fn merge_compound(prior: &Compound, row: &CompoundCsvRow) -> (Compound, Vec<FieldStatus>) {
    let mut merged = prior.clone();

    let mut statuses = vec![FieldStatus::new(
        FIELD_COMPOUND_NAME,
        json_val(&prior.compound_name),
        json_val(&prior.compound_name),
    )];

    merge_string_field(
        &mut statuses,
        FIELD_CHEMOTYPE,
        &mut merged.chemotype,
        normalize(row.chemotype.clone()),
    );

    let old_s10 = merged.s10;
    if row.s10.is_some() {
        merged.s10 = row.s10;
    }
    statuses.push(FieldStatus::new(FIELD_S10, json_opt(&old_s10), json_opt(&merged.s10)));

    merge_string_field(
        &mut statuses,
        FIELD_SMILES,
        &mut merged.smiles,
        normalize(row.smiles.clone()),
    );
    merge_string_field(
        &mut statuses,
        FIELD_SOURCE,
        &mut merged.source,
        normalize(row.source.clone()),
    );
    merge_string_field(
        &mut statuses,
        FIELD_PRIMARY_REFERENCE,
        &mut merged.primary_reference,
        normalize(row.primary_reference.clone()),
    );
    merge_string_field(
        &mut statuses,
        FIELD_PRIMARY_REFERENCE_URL,
        &mut merged.primary_reference_url,
        normalize(row.primary_reference_url.clone()),
    );

    (merged, statuses)
}

fn merge_string_field(
    statuses: &mut Vec<FieldStatus>,
    field_name: &'static str,
    target: &mut Option<String>,
    row_value: Option<String>,
) {
    let old = target.clone();
    if row_value.is_some() {
        *target = row_value;
    }
    statuses.push(FieldStatus::new(field_name, json_opt(&old), json_opt(target)));
}

fn create_compound(name: &str, row: &CompoundCsvRow) -> (Compound, Vec<FieldStatus>) {
    let created = Compound {
        compound_name: name.to_string(),
        chemotype: normalize(row.chemotype.clone()),
        s10: row.s10,
        smiles: normalize(row.smiles.clone()),
        source: normalize(row.source.clone()),
        primary_reference: normalize(row.primary_reference.clone()),
        primary_reference_url: normalize(row.primary_reference_url.clone()),
        hidden: false,
    };

    let mut statuses = vec![FieldStatus::new(
        FIELD_COMPOUND_NAME,
        None,
        json_val(&created.compound_name),
    )];
    let optional_fields: [(&'static str, Option<serde_json::Value>); 6] = [
        (FIELD_CHEMOTYPE, json_opt(&created.chemotype)),
        (FIELD_S10, json_opt(&created.s10)),
        (FIELD_SMILES, json_opt(&created.smiles)),
        (FIELD_SOURCE, json_opt(&created.source)),
        (FIELD_PRIMARY_REFERENCE, json_opt(&created.primary_reference)),
        (
            FIELD_PRIMARY_REFERENCE_URL,
            json_opt(&created.primary_reference_url),
        ),
    ];
    for (field_name, value) in optional_fields {
        if value.is_some() {
            statuses.push(FieldStatus::new(field_name, None, value));
        }
    }

    (created, statuses)
}

// ── Tests ────────────────────────────────────────────────────────────
