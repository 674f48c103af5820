use std::collections::BTreeSet;
use std::str::FromStr;

use crate::error::ExtractError;

pub const DEFAULT_KEYWORD: &str = "Sewing Operation";
pub const DEFAULT_OUTPUT_DIR: &str = "output_tables";
/// Highest page number a selection may name.
pub const MAX_PAGE_NUMBER: u32 = 100_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSelection {
    pages: BTreeSet<u32>,
}

impl PageSelection {
    #[must_use]
    pub fn contains(&self, page: u32) -> bool {
        self.pages.contains(&page)
    }

    /// Selected pages in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.pages.iter().copied()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

fn parse_page_number(raw: &str, what: &str) -> Result<u32, ExtractError> {
    let page: u32 = raw
        .trim()
        .parse()
        .map_err(|_| ExtractError::InvalidPageSelection(format!("invalid {what}: '{raw}'")))?;
    if page == 0 {
        return Err(ExtractError::InvalidPageSelection(
            "pages are 1-based".to_string(),
        ));
    }
    if page > MAX_PAGE_NUMBER {
        return Err(ExtractError::InvalidPageSelection(format!(
            "page {page} is beyond the last selectable page {MAX_PAGE_NUMBER}"
        )));
    }
    Ok(page)
}

impl FromStr for PageSelection {
    type Err = ExtractError;

    fn from_str(selection: &str) -> Result<Self, Self::Err> {
        let mut pages = BTreeSet::new();
        for token in selection.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            match token.split_once('-') {
                Some((start, end)) => {
                    let start = parse_page_number(start, "page range start")?;
                    let end = parse_page_number(end, "page range end")?;
                    if end < start {
                        return Err(ExtractError::InvalidPageSelection(format!(
                            "invalid range '{token}': end is smaller than start"
                        )));
                    }
                    pages.extend(start..=end);
                }
                None => {
                    pages.insert(parse_page_number(token, "page number")?);
                }
            }
        }

        if pages.is_empty() {
            return Err(ExtractError::InvalidPageSelection(
                "page selection cannot be empty".to_string(),
            ));
        }

        Ok(Self { pages })
    }
}

/// How the PDF backend locates table cells.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TableStrategy {
    /// Cells bounded by ruling lines and rectangle edges.
    #[default]
    Lattice,
    /// Cells inferred from text alignment, for tables without borders.
    Stream,
}

impl FromStr for TableStrategy {
    type Err = ExtractError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "lattice" | "lines" => Ok(Self::Lattice),
            "stream" | "text" => Ok(Self::Stream),
            other => Err(ExtractError::InvalidOption(format!(
                "unknown table strategy '{other}', expected 'lattice' or 'stream'"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Matched case-insensitively as a substring of the table text.
    pub keyword: String,
    pub pages: Option<PageSelection>,
    pub strategy: TableStrategy,
    pub delimiter: u8,
}

impl ExtractOptions {
    #[must_use]
    pub fn with_keyword(keyword: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ExtractError> {
        if !self.delimiter.is_ascii() || self.delimiter == b'\n' || self.delimiter == b'"' {
            return Err(ExtractError::InvalidOption(format!(
                "unsupported delimiter byte {:#04x}",
                self.delimiter
            )));
        }
        Ok(())
    }
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            keyword: DEFAULT_KEYWORD.to_string(),
            pages: None,
            strategy: TableStrategy::default(),
            delimiter: b',',
        }
    }
}
