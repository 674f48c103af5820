use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::csv_out::write_record_set;
use crate::error::ExtractError;
use crate::model::{ExportedFile, FileLocation, MatchedTable};
use crate::options::ExtractOptions;
use crate::record_set::RecordSet;

/// Where exported CSV bytes end up.
pub trait ExportSink {
    /// Called once per document before any table is stored.
    fn prepare(&mut self) -> Result<(), ExtractError>;

    fn store(&mut self, file_name: &str, contents: Vec<u8>) -> Result<ExportedFile, ExtractError>;
}

/// Writes CSV files into a directory, creating it on demand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl ExportSink for DirectorySink {
    fn prepare(&mut self) -> Result<(), ExtractError> {
        if !self.dir.is_dir() {
            fs::create_dir_all(&self.dir)?;
            info!(dir = %self.dir.display(), "created output directory");
        }
        Ok(())
    }

    fn store(&mut self, file_name: &str, contents: Vec<u8>) -> Result<ExportedFile, ExtractError> {
        let path = self.dir.join(file_name);
        fs::write(&path, contents)?;
        Ok(ExportedFile {
            file_name: file_name.to_string(),
            location: FileLocation::Disk(path),
        })
    }
}

/// Keeps CSV bytes in memory, for hosts without a writable filesystem.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemorySink;

impl ExportSink for MemorySink {
    fn prepare(&mut self) -> Result<(), ExtractError> {
        Ok(())
    }

    fn store(&mut self, file_name: &str, contents: Vec<u8>) -> Result<ExportedFile, ExtractError> {
        Ok(ExportedFile {
            file_name: file_name.to_string(),
            location: FileLocation::Memory(contents),
        })
    }
}

#[must_use]
pub fn export_file_name(document: &str, page: u32, table_index: usize) -> String {
    format!("{document}_page_{page}_table_{table_index}.csv")
}

pub fn export_table<K>(
    matched: &MatchedTable,
    options: &ExtractOptions,
    sink: &mut K,
) -> Result<ExportedFile, ExtractError>
where
    K: ExportSink + ?Sized,
{
    let record_set = RecordSet::from_table(&matched.table)?;
    let contents = write_record_set(&record_set, options.delimiter)?;
    let file_name = export_file_name(&matched.document, matched.page, matched.table_index);
    sink.store(&file_name, contents)
}
