//! Finds the tables of a PDF that mention a keyword and exports each one as CSV.
//!
//! The flow per document is: open the PDF, let the PDF backend find the tables of
//! each page, keep the tables whose text contains the keyword, and store every kept
//! table through an [`ExportSink`]. The exported files of a run can then be zipped with
//! [`build_archive`] or [`archive_to_file`].

mod archive;
mod csv_out;
mod error;
mod export;
mod keyword;
mod model;
mod options;
mod pipeline;
mod record_set;
mod report;
mod source;

pub use archive::{ARCHIVE_FILE_NAME, archive_to_file, build_archive, remove_exported};
pub use error::ExtractError;
pub use export::{DirectorySink, ExportSink, MemorySink, export_file_name, export_table};
pub use keyword::{matches_keyword, table_text};
pub use model::{Cell, ExportedFile, FileLocation, MatchedTable, Row, Table};
pub use options::{
    DEFAULT_KEYWORD, DEFAULT_OUTPUT_DIR, ExtractOptions, MAX_PAGE_NUMBER, PageSelection,
    TableStrategy,
};
pub use pipeline::{extract_documents, extract_from_source, extract_input};
pub use record_set::RecordSet;
pub use report::{DocumentReport, ResultSet, TableOutcome};
pub use source::{DocumentData, DocumentInput, PdfTableSource, TableSource};
