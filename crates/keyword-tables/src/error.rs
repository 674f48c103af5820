use std::io;
use std::path::PathBuf;

use pdfplumber::PdfError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to load PDF: {0}")]
    PdfLoad(#[from] PdfError),

    #[error("failed to read page {page}: {source}")]
    PdfPage {
        page: u32,
        #[source]
        source: PdfError,
    },

    #[error("failed to build archive: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("PDF file not found: {}", .0.display())]
    DocumentNotFound(PathBuf),

    #[error("invalid page selection: {0}")]
    InvalidPageSelection(String),

    #[error("invalid option: {0}")]
    InvalidOption(String),

    #[error("no pages available after applying selection")]
    NoPagesSelected,

    #[error("row {row} has {width} cells but the header only has {header_width}")]
    RowTooWide {
        row: usize,
        width: usize,
        header_width: usize,
    },

    #[error("duplicate header name '{0}'")]
    DuplicateHeader(String),
}
