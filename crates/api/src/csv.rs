//! CSV row decoding for upload endpoints.
//!
//! Turns raw upload bytes plus a header-row flag into a sequence of typed
//! row records. Any malformed row fails the whole upload with a client
//! error; there is no partial decode.

use csv::ReaderBuilder;
use serde::de::DeserializeOwned;

use crate::error::AppError;

/// Decode CSV bytes into typed rows.
///
/// With `header_row` set, columns are matched by header name; without it,
/// columns are matched positionally against the row struct's field order.
pub fn decode_rows<T: DeserializeOwned>(bytes: &[u8], header_row: bool) -> Result<Vec<T>, AppError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(header_row)
        .trim(csv::Trim::All)
        .from_reader(bytes);

    let mut rows = Vec::new();
    for (i, record) in reader.deserialize::<T>().enumerate() {
        let row = record
            .map_err(|e| AppError::BadRequest(format!("invalid CSV at row {}: {e}", i + 1)))?;
        rows.push(row);
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use kinscreen_core::rows::{ActivityProfileCsvRow, KdCsvRow};

    #[test]
    fn test_decode_with_header_row() {
        let csv = b"compoundName,discoverxGeneSymbol,entrezGeneSymbol,percentControl,compoundConcentration\n\
                    compoundA,discoverxA,entrezA,0.9,4\n";
        let rows: Vec<ActivityProfileCsvRow> = decode_rows(csv, true).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].compound_name.as_deref(), Some("compoundA"));
        assert_eq!(rows[0].percent_control, Some(0.9));
        assert_eq!(rows[0].compound_concentration, Some(4));
    }

    #[test]
    fn test_decode_without_header_row_is_positional() {
        let csv = b"compoundA,discoverxA,entrezA,0.9,4\ncompoundB,discoverxB,entrezB,0.8,3\n";
        let rows: Vec<ActivityProfileCsvRow> = decode_rows(csv, false).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].compound_name.as_deref(), Some("compoundB"));
    }

    #[test]
    fn test_decode_blank_fields_are_absent() {
        let csv = b"compoundA,discoverxA,,,\n";
        let rows: Vec<ActivityProfileCsvRow> = decode_rows(csv, false).unwrap();
        assert_eq!(rows[0].entrez_gene_symbol, None);
        assert_eq!(rows[0].percent_control, None);
        assert_eq!(rows[0].compound_concentration, None);
    }

    #[test]
    fn test_decode_kd_rows() {
        let csv = b"compoundA,discoverxA,entrezA,=,0.3\n";
        let rows: Vec<KdCsvRow> = decode_rows(csv, false).unwrap();
        assert_eq!(rows[0].kd_qualifier.as_deref(), Some("="));
        assert_eq!(rows[0].kd, Some(0.3));
    }

    #[test]
    fn test_decode_malformed_value_fails_whole_upload() {
        let csv = b"compoundA,discoverxA,entrezA,not-a-number,4\n";
        let result: Result<Vec<ActivityProfileCsvRow>, _> = decode_rows(csv, false);
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[test]
    fn test_decode_empty_input_yields_no_rows() {
        let rows: Vec<ActivityProfileCsvRow> = decode_rows(b"", false).unwrap();
        assert!(rows.is_empty());
    }
}
