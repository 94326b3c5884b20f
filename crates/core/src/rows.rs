//! Typed CSV row records, one struct per import endpoint.
//!
//! Field names are camelCase on the wire so the same struct deserializes
//! both positionally (no header row) and by header name. Blank string
//! fields are normalized to `None` before merging; see [`normalize`].

use serde::Deserialize;

/// One row of an activity-profile import.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityProfileCsvRow {
    pub compound_name: Option<String>,
    pub discoverx_gene_symbol: Option<String>,
    pub entrez_gene_symbol: Option<String>,
    pub percent_control: Option<f64>,
    pub compound_concentration: Option<i32>,
}

/// One row of a Kd-value import.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KdCsvRow {
    pub compound_name: Option<String>,
    pub discoverx_gene_symbol: Option<String>,
    pub entrez_gene_symbol: Option<String>,
    /// "=", ">", etc.
    pub kd_qualifier: Option<String>,
    pub kd: Option<f64>,
}

/// One row of a compound import.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompoundCsvRow {
    pub compound_name: Option<String>,
    pub chemotype: Option<String>,
    pub s10: Option<f64>,
    pub smiles: Option<String>,
    pub source: Option<String>,
    pub primary_reference: Option<String>,
    pub primary_reference_url: Option<String>,
}

/// Normalize an optional string field: trims whitespace and maps blank
/// values to `None` so they are treated as "not provided" by the merge.
pub fn normalize(value: Option<String>) -> Option<String> {
    match value {
        Some(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        None => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_blank_is_absent() {
        assert_eq!(normalize(None), None);
        assert_eq!(normalize(Some(String::new())), None);
        assert_eq!(normalize(Some("   ".to_string())), None);
    }

    #[test]
    fn test_normalize_trims() {
        assert_eq!(normalize(Some(" ABL1 ".to_string())), Some("ABL1".to_string()));
    }
}
