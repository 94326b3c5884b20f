use kinscreen_core::model::ActivityProfile;
use kinscreen_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `activity_profile` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityProfileRow {
    pub id: DbId,
    pub compound_name: String,
    pub discoverx_gene_symbol: String,
    pub entrez_gene_symbol: Option<String>,
    pub percent_control: Option<f64>,
    pub compound_concentration: Option<i32>,
    pub kd: Option<f64>,
    pub kd_qualifier: Option<String>,
    pub create_date: Timestamp,
}

impl From<ActivityProfileRow> for ActivityProfile {
    fn from(row: ActivityProfileRow) -> Self {
        ActivityProfile {
            id: Some(row.id),
            compound_name: row.compound_name,
            discoverx_gene_symbol: row.discoverx_gene_symbol,
            entrez_gene_symbol: row.entrez_gene_symbol,
            percent_control: row.percent_control,
            compound_concentration: row.compound_concentration,
            kd: row.kd,
            kd_qualifier: row.kd_qualifier,
            create_date: row.create_date,
        }
    }
}
