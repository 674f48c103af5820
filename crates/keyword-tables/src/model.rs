use std::path::PathBuf;

/// A single extracted cell. `None` marks a slot the extractor saw but could not fill.
pub type Cell = Option<String>;

pub type Row = Vec<Cell>;

/// One table as produced by a [`crate::TableSource`]. Row 0 is the header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub rows: Vec<Row>,
}

impl Table {
    #[must_use]
    pub fn new(rows: Vec<Row>) -> Self {
        Self { rows }
    }

    /// Builds a table where every cell is present.
    #[must_use]
    pub fn from_text_rows<R, C>(rows: R) -> Self
    where
        R: IntoIterator,
        R::Item: IntoIterator<Item = C>,
        C: Into<String>,
    {
        Self {
            rows: rows
                .into_iter()
                .map(|row| row.into_iter().map(|cell| Some(cell.into())).collect())
                .collect(),
        }
    }

    #[must_use]
    pub fn header(&self) -> Option<&Row> {
        self.rows.first()
    }

    #[must_use]
    pub fn has_header(&self) -> bool {
        self.header().is_some_and(|header| !header.is_empty())
    }

    pub fn data_rows(&self) -> impl Iterator<Item = &Row> {
        self.rows.iter().skip(1)
    }

    pub fn present_cells(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().flatten().filter_map(Option::as_deref)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchedTable {
    pub document: String,
    pub page: u32,
    pub table_index: usize,
    pub table: Table,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileLocation {
    Disk(PathBuf),
    Memory(Vec<u8>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedFile {
    pub file_name: String,
    pub location: FileLocation,
}

impl ExportedFile {
    #[must_use]
    pub fn path(&self) -> Option<&PathBuf> {
        match &self.location {
            FileLocation::Disk(path) => Some(path),
            FileLocation::Memory(_) => None,
        }
    }

    /// Where the file lives, for notices.
    #[must_use]
    pub fn display_location(&self) -> String {
        match &self.location {
            FileLocation::Disk(path) => path.display().to_string(),
            FileLocation::Memory(_) => self.file_name.clone(),
        }
    }
}
