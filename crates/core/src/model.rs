//! Domain model for the screening data set.
//!
//! Compounds and kinases are master data; activity profiles record one
//! measured compound/kinase interaction. An activity profile is uniquely
//! identified by its composite natural key: (compound name, DiscoveRx gene
//! symbol), case-insensitive on the compound name.

use serde::{Deserialize, Serialize};

use crate::types::{DbId, Timestamp};

/// A screening compound. Identified by a unique, case-insensitive name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Compound {
    pub compound_name: String,
    pub chemotype: Option<String>,
    /// s(10) selectivity score.
    pub s10: Option<f64>,
    pub smiles: Option<String>,
    pub source: Option<String>,
    pub primary_reference: Option<String>,
    pub primary_reference_url: Option<String>,
    /// Hidden compounds are excluded from unfiltered listings.
    #[serde(default)]
    pub hidden: bool,
}

/// A kinase. Read-only reference data from the import engine's perspective;
/// both gene symbols are usable as alternate lookup keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Kinase {
    pub id: DbId,
    pub discoverx_gene_symbol: String,
    pub entrez_gene_symbol: String,
}

/// One measured interaction between a compound and a kinase.
///
/// `id` is `None` for profiles created by an import that has not been
/// committed yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityProfile {
    pub id: Option<DbId>,
    pub compound_name: String,
    pub discoverx_gene_symbol: String,
    pub entrez_gene_symbol: Option<String>,
    /// Percent-control activity value.
    pub percent_control: Option<f64>,
    /// Compound concentration, in nM.
    pub compound_concentration: Option<i32>,
    pub kd: Option<f64>,
    /// Kd qualifier, e.g. "=" or ">".
    pub kd_qualifier: Option<String>,
    pub create_date: Timestamp,
}
