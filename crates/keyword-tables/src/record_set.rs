use std::collections::HashSet;

use crate::error::ExtractError;
use crate::model::Table;

/// A table reshaped into named fields and equally wide records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordSet {
    pub headers: Vec<String>,
    pub records: Vec<Vec<String>>,
}

impl RecordSet {
    /// Row 0 becomes the field names and the remaining rows the records.
    ///
    /// Short rows are padded with empty values. A row wider than the header, or
    /// two equal non-blank header names, is an error.
    pub fn from_table(table: &Table) -> Result<Self, ExtractError> {
        let headers = table
            .header()
            .map(|row| {
                row.iter()
                    .map(|cell| cell.clone().unwrap_or_default())
                    .collect::<Vec<_>>()
            })
            .unwrap_or_default();

        let mut seen = HashSet::new();
        for name in headers.iter().filter(|name| !name.trim().is_empty()) {
            if !seen.insert(name.as_str()) {
                return Err(ExtractError::DuplicateHeader(name.clone()));
            }
        }

        let width = headers.len();
        let mut records = Vec::new();
        for (index, row) in table.data_rows().enumerate() {
            if row.len() > width {
                return Err(ExtractError::RowTooWide {
                    row: index + 1,
                    width: row.len(),
                    header_width: width,
                });
            }

            let mut record = row
                .iter()
                .map(|cell| cell.clone().unwrap_or_default())
                .collect::<Vec<_>>();
            record.resize(width, String::new());
            records.push(record);
        }

        Ok(Self { headers, records })
    }
}

#[cfg(test)]
mod tests {
    use super::RecordSet;
    use crate::error::ExtractError;
    use crate::model::Table;

    fn text(value: &str) -> Option<String> {
        Some(value.to_string())
    }

    #[test]
    fn pads_short_rows_and_blanks_absent_cells() {
        let table = Table::new(vec![
            vec![text("Op"), text("Desc"), text("SMV")],
            vec![text("10")],
            vec![None, text("Sewing Operation"), None],
        ]);

        let record_set = RecordSet::from_table(&table).expect("record set should build");
        assert_eq!(record_set.headers, vec!["Op", "Desc", "SMV"]);
        assert_eq!(record_set.records[0], vec!["10", "", ""]);
        assert_eq!(record_set.records[1], vec!["", "Sewing Operation", ""]);
    }

    #[test]
    fn rejects_rows_wider_than_header() {
        let table = Table::from_text_rows(vec![vec!["Op", "Desc"], vec!["10", "Sew", "extra"]]);
        let err = RecordSet::from_table(&table).expect_err("wide row should fail");
        assert!(matches!(
            err,
            ExtractError::RowTooWide {
                row: 1,
                width: 3,
                header_width: 2
            }
        ));
    }

    #[test]
    fn rejects_duplicate_named_headers_but_allows_blank_ones() {
        let table = Table::from_text_rows(vec![vec!["Op", "Op"], vec!["1", "2"]]);
        assert!(matches!(
            RecordSet::from_table(&table),
            Err(ExtractError::DuplicateHeader(name)) if name == "Op"
        ));

        let blanks = Table::new(vec![vec![None, None, text("Desc")], vec![text("1")]]);
        let record_set = RecordSet::from_table(&blanks).expect("blank headers are allowed");
        assert_eq!(record_set.headers, vec!["", "", "Desc"]);
    }

    #[test]
    fn header_only_table_has_no_records() {
        let table = Table::from_text_rows(vec![vec!["Op", "Desc"]]);
        let record_set = RecordSet::from_table(&table).expect("record set should build");
        assert!(record_set.records.is_empty());
    }
}
