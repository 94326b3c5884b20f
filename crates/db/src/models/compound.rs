use kinscreen_core::model::Compound;
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `compound` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompoundRow {
    pub compound_name: String,
    pub chemotype: Option<String>,
    pub s10: Option<f64>,
    pub smiles: Option<String>,
    pub source: Option<String>,
    pub primary_reference: Option<String>,
    pub primary_reference_url: Option<String>,
    pub hidden: bool,
}

impl From<CompoundRow> for Compound {
    fn from(row: CompoundRow) -> Self {
        Compound {
            compound_name: row.compound_name,
            chemotype: row.chemotype,
            s10: row.s10,
            smiles: row.smiles,
            source: row.source,
            primary_reference: row.primary_reference,
            primary_reference_url: row.primary_reference_url,
            hidden: row.hidden,
        }
    }
}
