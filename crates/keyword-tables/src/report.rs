use crate::error::ExtractError;
use crate::model::ExportedFile;

/// What happened to one keyword-matching table.
#[derive(Debug)]
pub enum TableOutcome {
    Exported {
        page: u32,
        table_index: usize,
        file: ExportedFile,
    },
    Failed {
        page: u32,
        table_index: usize,
        error: ExtractError,
    },
}

impl TableOutcome {
    #[must_use]
    pub fn page(&self) -> u32 {
        match self {
            Self::Exported { page, .. } | Self::Failed { page, .. } => *page,
        }
    }

    #[must_use]
    pub fn table_index(&self) -> usize {
        match self {
            Self::Exported { table_index, .. } | Self::Failed { table_index, .. } => *table_index,
        }
    }

    #[must_use]
    pub fn notice(&self, keyword: &str) -> String {
        match self {
            Self::Exported {
                page,
                table_index,
                file,
            } => format!(
                "saved table {table_index} from page {page} containing '{keyword}' -> {}",
                file.display_location()
            ),
            Self::Failed {
                page,
                table_index,
                error,
            } => format!("failed to save table {table_index} from page {page}: {error}"),
        }
    }
}

#[derive(Debug)]
pub struct DocumentReport {
    /// Base name of the document, as used in exported file names.
    pub document: String,
    pub keyword: String,
    pub tables_scanned: usize,
    pub outcomes: Vec<TableOutcome>,
    /// Set when the document could not be opened or read to the end.
    pub error: Option<ExtractError>,
}

impl DocumentReport {
    #[must_use]
    pub fn new(document: impl Into<String>, keyword: impl Into<String>) -> Self {
        Self {
            document: document.into(),
            keyword: keyword.into(),
            tables_scanned: 0,
            outcomes: Vec::new(),
            error: None,
        }
    }

    pub fn exported_files(&self) -> impl Iterator<Item = &ExportedFile> {
        self.outcomes.iter().filter_map(|outcome| match outcome {
            TableOutcome::Exported { file, .. } => Some(file),
            TableOutcome::Failed { .. } => None,
        })
    }

    #[must_use]
    pub fn exported_count(&self) -> usize {
        self.exported_files().count()
    }

    #[must_use]
    pub fn failure_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|outcome| matches!(outcome, TableOutcome::Failed { .. }))
            .count()
    }

    /// One-line summary for the whole document.
    #[must_use]
    pub fn notice(&self) -> String {
        if let Some(error) = &self.error {
            return format!(
                "error while processing '{}': {error} ({} table(s) saved before the error)",
                self.document,
                self.exported_count()
            );
        }

        match self.exported_count() {
            0 => format!(
                "no table containing '{}' found in '{}'",
                self.keyword, self.document
            ),
            count => format!(
                "saved {count} table(s) containing '{}' from '{}'",
                self.keyword, self.document
            ),
        }
    }
}

/// Every document report of one run, in submission order.
#[derive(Debug, Default)]
pub struct ResultSet {
    pub documents: Vec<DocumentReport>,
}

impl ResultSet {
    pub fn exported_files(&self) -> impl Iterator<Item = &ExportedFile> {
        self.documents
            .iter()
            .flat_map(|document| document.exported_files())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.documents.iter().map(DocumentReport::exported_count).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn failure_count(&self) -> usize {
        self.documents.iter().map(DocumentReport::failure_count).sum()
    }

    #[must_use]
    pub fn document_error_count(&self) -> usize {
        self.documents
            .iter()
            .filter(|document| document.error.is_some())
            .count()
    }

    #[must_use]
    pub fn into_exported_files(self) -> Vec<ExportedFile> {
        self.documents
            .into_iter()
            .flat_map(|document| document.outcomes)
            .filter_map(|outcome| match outcome {
                TableOutcome::Exported { file, .. } => Some(file),
                TableOutcome::Failed { .. } => None,
            })
            .collect()
    }
}
