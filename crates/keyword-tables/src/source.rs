use std::fs;
use std::path::{Path, PathBuf};

use pdfplumber::{Pdf, Strategy, TableSettings};
use tracing::debug;

use crate::error::ExtractError;
use crate::model::Table;
use crate::options::{ExtractOptions, PageSelection, TableStrategy};

const FALLBACK_BASE_NAME: &str = "document";

/// Yields the raw tables of a document, page by page.
pub trait TableSource {
    /// 1-based page ordinals in document order.
    fn page_numbers(&self) -> Vec<u32>;

    /// Tables of `page` in extraction order.
    fn tables_on_page(&self, page: u32) -> Result<Vec<Table>, ExtractError>;
}

/// Pre-extracted tables; index `i` holds page `i + 1`.
impl TableSource for Vec<Vec<Table>> {
    fn page_numbers(&self) -> Vec<u32> {
        (1..=self.len())
            .filter_map(|page| u32::try_from(page).ok())
            .collect()
    }

    fn tables_on_page(&self, page: u32) -> Result<Vec<Table>, ExtractError> {
        let index = usize::try_from(page)
            .ok()
            .and_then(|page| page.checked_sub(1));
        Ok(index
            .and_then(|index| self.get(index))
            .cloned()
            .unwrap_or_default())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentData {
    Path(PathBuf),
    Bytes(Vec<u8>),
}

/// A PDF to process, with the name it was given or uploaded under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentInput {
    pub name: String,
    pub data: DocumentData,
}

impl DocumentInput {
    #[must_use]
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self {
            name: path.display().to_string(),
            data: DocumentData::Path(path),
        }
    }

    #[must_use]
    pub fn from_bytes(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            data: DocumentData::Bytes(bytes),
        }
    }

    /// File stem of the name, used as the prefix of exported file names.
    #[must_use]
    pub fn base_name(&self) -> String {
        // Uploads from Windows browsers may carry backslash-separated paths.
        let name = self.name.rsplit(['/', '\\']).next().unwrap_or_default();
        Path::new(name)
            .file_stem()
            .map(|stem| stem.to_string_lossy().trim().to_string())
            .filter(|stem| !stem.is_empty())
            .unwrap_or_else(|| FALLBACK_BASE_NAME.to_string())
    }
}

/// Tables found by the PDF backend on the selected pages of a document.
pub struct PdfTableSource {
    pdf: Pdf,
    pages: Vec<u32>,
    settings: TableSettings,
}

impl PdfTableSource {
    pub fn open(input: &DocumentInput, options: &ExtractOptions) -> Result<Self, ExtractError> {
        options.validate()?;

        let pdf = match &input.data {
            DocumentData::Path(path) => {
                if !path.is_file() {
                    return Err(ExtractError::DocumentNotFound(path.clone()));
                }
                Pdf::open(&fs::read(path)?, None)?
            }
            DocumentData::Bytes(bytes) => Pdf::open(bytes, None)?,
        };

        let pages = select_pages(pdf.page_count(), options.pages.as_ref())?;
        debug!(
            document = %input.name,
            page_count = pdf.page_count(),
            selected = pages.len(),
            "opened PDF"
        );

        Ok(Self {
            pdf,
            pages,
            settings: table_settings(options.strategy),
        })
    }
}

fn select_pages(
    page_count: usize,
    selection: Option<&PageSelection>,
) -> Result<Vec<u32>, ExtractError> {
    let last = u32::try_from(page_count).unwrap_or(u32::MAX);
    let pages = match selection {
        Some(selection) => selection.iter().filter(|page| *page <= last).collect::<Vec<_>>(),
        None => (1..=last).collect(),
    };

    // A document without pages still scans cleanly; only a selection can miss.
    if pages.is_empty() && selection.is_some() {
        return Err(ExtractError::NoPagesSelected);
    }
    Ok(pages)
}

fn table_settings(strategy: TableStrategy) -> TableSettings {
    TableSettings {
        strategy: match strategy {
            TableStrategy::Lattice => Strategy::Lattice,
            TableStrategy::Stream => Strategy::Stream,
        },
        ..TableSettings::default()
    }
}

impl TableSource for PdfTableSource {
    fn page_numbers(&self) -> Vec<u32> {
        self.pages.clone()
    }

    fn tables_on_page(&self, page: u32) -> Result<Vec<Table>, ExtractError> {
        let Some(index) = usize::try_from(page).ok().and_then(|page| page.checked_sub(1)) else {
            return Ok(Vec::new());
        };
        if index >= self.pdf.page_count() {
            return Ok(Vec::new());
        }

        let pdf_page = self
            .pdf
            .page(index)
            .map_err(|source| ExtractError::PdfPage { page, source })?;
        Ok(pdf_page
            .extract_tables(&self.settings)
            .into_iter()
            .map(Table::new)
            .collect())
    }
}
