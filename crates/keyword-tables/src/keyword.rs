use crate::model::Table;

/// All present cells of `table`, row-major, joined by single spaces.
#[must_use]
pub fn table_text(table: &Table) -> String {
    table.present_cells().collect::<Vec<_>>().join(" ")
}

/// Case-insensitive substring test of `keyword` against [`table_text`].
///
/// An empty keyword matches any table with at least one present cell.
#[must_use]
pub fn matches_keyword(table: &Table, keyword: &str) -> bool {
    if keyword.is_empty() {
        return table.present_cells().next().is_some();
    }

    table_text(table)
        .to_lowercase()
        .contains(&keyword.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::{matches_keyword, table_text};
    use crate::model::Table;

    fn sewing_table() -> Table {
        Table::new(vec![
            vec![Some("Op".to_string()), Some("Desc".to_string())],
            vec![Some("10".to_string()), None],
            vec![None, Some("Sewing OPERATION".to_string())],
        ])
    }

    #[test]
    fn joins_present_cells_row_major() {
        assert_eq!(table_text(&sewing_table()), "Op Desc 10 Sewing OPERATION");
    }

    #[test]
    fn matches_ignoring_case() {
        assert!(matches_keyword(&sewing_table(), "sewing operation"));
        assert!(matches_keyword(&sewing_table(), "SEWING"));
        assert!(!matches_keyword(&sewing_table(), "cutting"));
    }

    #[test]
    fn matches_across_cell_boundaries() {
        assert!(matches_keyword(&sewing_table(), "desc 10"));
        assert!(!matches_keyword(&sewing_table(), "desc  10"));
    }

    #[test]
    fn empty_keyword_needs_a_present_cell() {
        assert!(matches_keyword(&sewing_table(), ""));
        assert!(!matches_keyword(&Table::new(vec![vec![None, None]]), ""));
        assert!(!matches_keyword(&Table::default(), ""));
    }
}
