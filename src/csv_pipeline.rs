use keyword_tables::{
    DocumentInput, ExtractOptions, MemorySink, ResultSet, TableOutcome, build_archive,
    extract_documents,
};

use crate::config::AppConfig;
use crate::error::ApiError;
use crate::models::{DocumentSummary, ExtractionSummaryResponse, TableFailure};

/// One uploaded PDF and the file name the browser sent with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upload {
    pub name: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveDownload {
    pub bytes: Vec<u8>,
    pub table_count: usize,
}

/// An empty submitted keyword is kept: it matches every table with text.
pub fn resolve_keyword(submitted: Option<String>, default_keyword: &str) -> String {
    submitted.unwrap_or_else(|| default_keyword.to_string())
}

pub fn extract_options(keyword: String, config: &AppConfig) -> ExtractOptions {
    ExtractOptions {
        keyword,
        strategy: config.strategy,
        ..ExtractOptions::default()
    }
}

pub fn check_upload_size(uploads: &[Upload], config: &AppConfig) -> Result<(), ApiError> {
    let total = uploads.iter().map(|upload| upload.bytes.len()).sum::<usize>();
    if total > config.max_upload_bytes {
        return Err(ApiError::PayloadTooLarge(format!(
            "uploaded PDFs total {total} bytes, limit is {}",
            config.max_upload_bytes
        )));
    }
    Ok(())
}

pub fn run_extraction(uploads: Vec<Upload>, options: &ExtractOptions) -> ResultSet {
    let inputs = uploads
        .into_iter()
        .map(|upload| DocumentInput::from_bytes(upload.name, upload.bytes))
        .collect::<Vec<_>>();
    extract_documents(&inputs, options, &mut MemorySink)
}

pub fn log_results(results: &ResultSet) {
    for document in &results.documents {
        for outcome in &document.outcomes {
            match outcome {
                TableOutcome::Exported { .. } => {
                    worker::console_log!("{}", outcome.notice(&document.keyword));
                }
                TableOutcome::Failed { .. } => {
                    worker::console_error!("{}", outcome.notice(&document.keyword));
                }
            }
        }

        if document.error.is_some() {
            worker::console_error!("{}", document.notice());
        } else {
            worker::console_log!("{}", document.notice());
        }
    }
}

pub fn summarize(results: &ResultSet, keyword: &str) -> ExtractionSummaryResponse {
    let documents = results
        .documents
        .iter()
        .map(|document| DocumentSummary {
            document: document.document.clone(),
            exported: document
                .exported_files()
                .map(|file| file.file_name.clone())
                .collect(),
            failures: document
                .outcomes
                .iter()
                .filter_map(|outcome| match outcome {
                    TableOutcome::Failed {
                        page,
                        table_index,
                        error,
                    } => Some(TableFailure {
                        page: *page,
                        table: *table_index,
                        message: error.to_string(),
                    }),
                    TableOutcome::Exported { .. } => None,
                })
                .collect(),
            error: document.error.as_ref().map(ToString::to_string),
            notice: document.notice(),
        })
        .collect();

    ExtractionSummaryResponse {
        keyword: keyword.to_string(),
        table_count: results.len(),
        documents,
    }
}

/// Zips every exported table of the run, or reports that nothing matched.
pub fn build_download(results: ResultSet, keyword: &str) -> Result<ArchiveDownload, ApiError> {
    let table_count = results.len();
    let files = results.into_exported_files();
    let Some(bytes) = build_archive(&files)? else {
        return Err(ApiError::NotFound(format!(
            "no table containing '{keyword}' was found in any uploaded document"
        )));
    };

    Ok(ArchiveDownload { bytes, table_count })
}
