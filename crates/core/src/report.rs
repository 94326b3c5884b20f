//! Import report types: the sole observable artifact of an import.
//!
//! The report mirrors the upload's row order exactly. Each row contributes
//! an ordered list of [`FieldStatus`] entries recording the pre-merge and
//! post-merge value of every tracked field.

use serde::Serialize;
use serde_json::Value;

// Field names as they appear in reports, matching the CSV column names.
pub const FIELD_COMPOUND_NAME: &str = "compoundName";
pub const FIELD_DISCOVERX_GENE_SYMBOL: &str = "discoverxGeneSymbol";
pub const FIELD_ENTREZ_GENE_SYMBOL: &str = "entrezGeneSymbol";
pub const FIELD_PERCENT_CONTROL: &str = "percentControl";
pub const FIELD_COMPOUND_CONCENTRATION: &str = "compoundConcentration";
pub const FIELD_KD: &str = "kd";
pub const FIELD_CHEMOTYPE: &str = "chemotype";
pub const FIELD_S10: &str = "s10";
pub const FIELD_SMILES: &str = "smiles";
pub const FIELD_SOURCE: &str = "source";
pub const FIELD_PRIMARY_REFERENCE: &str = "primaryReference";
pub const FIELD_PRIMARY_REFERENCE_URL: &str = "primaryReferenceUrl";

/// The before/after state of one field of one imported row.
///
/// `old_value` is `None` when the row created a brand-new record. For
/// matched records `old_value == new_value` means the row left the field
/// unchanged (either blank in the row, or identical).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldStatus {
    pub field_name: &'static str,
    pub old_value: Option<Value>,
    pub new_value: Option<Value>,
}

impl FieldStatus {
    pub fn new(field_name: &'static str, old_value: Option<Value>, new_value: Option<Value>) -> Self {
        Self {
            field_name,
            old_value,
            new_value,
        }
    }
}

/// Response envelope for an import: one `FieldStatus` list per imported
/// row, in input row order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportReport {
    pub field_statuses: Vec<Vec<FieldStatus>>,
}

/// Serialize an optional field value for reporting. Absent stays `None`.
pub(crate) fn json_opt<T: Serialize>(value: &Option<T>) -> Option<Value> {
    value
        .as_ref()
        .map(|v| serde_json::to_value(v).unwrap_or(Value::Null))
}

/// Serialize a required field value for reporting.
pub(crate) fn json_val<T: Serialize>(value: &T) -> Option<Value> {
    Some(serde_json::to_value(value).unwrap_or(Value::Null))
}
