use kinscreen_core::model::Kinase;
use kinscreen_core::types::DbId;
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `kinase` table. Read-only reference data.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KinaseRow {
    pub id: DbId,
    pub discoverx_gene_symbol: String,
    pub entrez_gene_symbol: String,
}

impl From<KinaseRow> for Kinase {
    fn from(row: KinaseRow) -> Self {
        Kinase {
            id: row.id,
            discoverx_gene_symbol: row.discoverx_gene_symbol,
            entrez_gene_symbol: row.entrez_gene_symbol,
        }
    }
}
