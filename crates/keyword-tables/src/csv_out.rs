use csv::WriterBuilder;

use crate::error::ExtractError;
use crate::record_set::RecordSet;

pub(crate) fn write_record_set(
    record_set: &RecordSet,
    delimiter: u8,
) -> Result<Vec<u8>, ExtractError> {
    let mut writer = WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(Vec::<u8>::new());
    writer.write_record(&record_set.headers)?;
    for record in &record_set.records {
        writer.write_record(record)?;
    }
    writer.flush()?;

    writer
        .into_inner()
        .map_err(|error| ExtractError::Csv(error.into_error().into()))
}
