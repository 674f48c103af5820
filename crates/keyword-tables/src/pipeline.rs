use tracing::{debug, error, info, warn};

use crate::export::{ExportSink, export_table};
use crate::keyword::matches_keyword;
use crate::model::MatchedTable;
use crate::options::ExtractOptions;
use crate::report::{DocumentReport, ResultSet, TableOutcome};
use crate::source::{DocumentInput, PdfTableSource, TableSource};

fn scan_source<S, K>(source: &S, options: &ExtractOptions, sink: &mut K, report: &mut DocumentReport)
where
    S: TableSource + ?Sized,
    K: ExportSink + ?Sized,
{
    for page in source.page_numbers() {
        let tables = match source.tables_on_page(page) {
            Ok(tables) => tables,
            Err(err) => {
                error!(document = %report.document, page, error = %err, "failed to read page tables");
                report.error = Some(err);
                return;
            }
        };

        for (index, table) in tables.into_iter().enumerate() {
            let table_index = index + 1;
            report.tables_scanned += 1;

            if !matches_keyword(&table, &options.keyword) {
                debug!(page, table_index, "keyword not present; skipping table");
                continue;
            }
            if !table.has_header() {
                debug!(page, table_index, "matching table has no header row; skipping");
                continue;
            }

            let matched = MatchedTable {
                document: report.document.clone(),
                page,
                table_index,
                table,
            };
            let outcome = match export_table(&matched, options, sink) {
                Ok(file) => {
                    info!(page, table_index, file = %file.display_location(), "exported table");
                    TableOutcome::Exported {
                        page,
                        table_index,
                        file,
                    }
                }
                Err(err) => {
                    warn!(page, table_index, error = %err, "failed to export table");
                    TableOutcome::Failed {
                        page,
                        table_index,
                        error: err,
                    }
                }
            };
            report.outcomes.push(outcome);
        }
    }
}

/// Runs the keyword filter and export over tables that are already extracted.
pub fn extract_from_source<S, K>(
    document: &str,
    source: &S,
    options: &ExtractOptions,
    sink: &mut K,
) -> DocumentReport
where
    S: TableSource + ?Sized,
    K: ExportSink + ?Sized,
{
    let mut report = DocumentReport::new(document, &options.keyword);
    if let Err(err) = sink.prepare() {
        error!(document, error = %err, "failed to prepare export destination");
        report.error = Some(err);
        return report;
    }

    scan_source(source, options, sink, &mut report);
    report
}

/// Opens one PDF and exports its keyword-matching tables.
///
/// Never fails as a whole: open and read errors land in [`DocumentReport::error`].
pub fn extract_input<K>(input: &DocumentInput, options: &ExtractOptions, sink: &mut K) -> DocumentReport
where
    K: ExportSink + ?Sized,
{
    let mut report = DocumentReport::new(input.base_name(), &options.keyword);
    if let Err(err) = sink.prepare() {
        error!(document = %input.name, error = %err, "failed to prepare export destination");
        report.error = Some(err);
        return report;
    }

    info!(document = %input.name, keyword = %options.keyword, "searching tables");
    match PdfTableSource::open(input, options) {
        Ok(source) => scan_source(&source, options, sink, &mut report),
        Err(err) => {
            error!(document = %input.name, error = %err, "failed to open document");
            report.error = Some(err);
        }
    }
    report
}

/// Processes `inputs` in order; a failing document never stops the others.
pub fn extract_documents<K>(inputs: &[DocumentInput], options: &ExtractOptions, sink: &mut K) -> ResultSet
where
    K: ExportSink + ?Sized,
{
    let documents = inputs
        .iter()
        .map(|input| extract_input(input, options, sink))
        .collect();
    ResultSet { documents }
}
