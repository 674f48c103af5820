use serde::{Deserialize, Serialize};

pub const KEYWORD_FIELD: &str = "keyword";
pub const UPLOAD_FIELD: &str = "files";
pub const ARCHIVE_CONTENT_TYPE: &str = "application/zip";
pub const TABLE_COUNT_HEADER: &str = "X-Table-Count";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TableFailure {
    pub page: u32,
    pub table: usize,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DocumentSummary {
    pub document: String,
    pub exported: Vec<String>,
    pub failures: Vec<TableFailure>,
    pub error: Option<String>,
    pub notice: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExtractionSummaryResponse {
    pub keyword: String,
    pub table_count: usize,
    pub documents: Vec<DocumentSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}
