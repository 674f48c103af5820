use std::borrow::Cow;
use std::fs;
use std::io::{Cursor, ErrorKind, Write};
use std::path::Path;

use tracing::{debug, warn};
use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use crate::error::ExtractError;
use crate::model::{ExportedFile, FileLocation};

pub const ARCHIVE_FILE_NAME: &str = "extracted_tables.zip";

fn entry_name(file: &ExportedFile) -> String {
    let name = match &file.location {
        FileLocation::Disk(path) => path.file_name(),
        FileLocation::Memory(_) => Path::new(&file.file_name).file_name(),
    };
    name.map_or_else(
        || file.file_name.clone(),
        |name| name.to_string_lossy().into_owned(),
    )
}

fn read_contents(file: &ExportedFile) -> Result<Cow<'_, [u8]>, ExtractError> {
    match &file.location {
        FileLocation::Disk(path) => Ok(Cow::Owned(fs::read(path)?)),
        FileLocation::Memory(bytes) => Ok(Cow::Borrowed(bytes)),
    }
}

/// Zips `files` flat under their base names. Returns `None` when there is nothing to zip.
///
/// Entries sharing a name collapse into one, keeping the first position and the
/// last contents, the same outcome as overwriting the file on disk.
pub fn build_archive(files: &[ExportedFile]) -> Result<Option<Vec<u8>>, ExtractError> {
    if files.is_empty() {
        return Ok(None);
    }

    let mut entries: Vec<(String, Cow<'_, [u8]>)> = Vec::with_capacity(files.len());
    for file in files {
        let name = entry_name(file);
        let contents = read_contents(file)?;
        match entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some(entry) => {
                debug!(name = %name, "replacing duplicate archive entry");
                entry.1 = contents;
            }
            None => entries.push((name, contents)),
        }
    }

    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    for (name, contents) in &entries {
        writer.start_file(name.as_str(), options)?;
        writer.write_all(contents)?;
    }

    Ok(Some(writer.finish()?.into_inner()))
}

/// Deletes the on-disk files among `files`. Files already gone are ignored.
pub fn remove_exported(files: &[ExportedFile]) -> Result<(), ExtractError> {
    for path in files.iter().filter_map(ExportedFile::path) {
        match fs::remove_file(path) {
            Ok(()) => debug!(path = %path.display(), "removed exported csv"),
            Err(error) if error.kind() == ErrorKind::NotFound => {}
            Err(error) => {
                warn!(path = %path.display(), %error, "failed to remove exported csv");
                return Err(error.into());
            }
        }
    }
    Ok(())
}

/// Writes the archive of `files` to `path`, then deletes the exported files.
///
/// Returns `false` when there was nothing to archive. The exported files stay in
/// place unless the archive was written.
pub fn archive_to_file(files: &[ExportedFile], path: &Path) -> Result<bool, ExtractError> {
    let Some(bytes) = build_archive(files)? else {
        return Ok(false);
    };

    fs::write(path, bytes)?;
    debug!(path = %path.display(), entries = files.len(), "wrote archive");
    remove_exported(files)?;
    Ok(true)
}
