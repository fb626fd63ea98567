//! CSV reading operations.

use std::{fs::File, io::Cursor, path::Path};

use polars::{frame::DataFrame, io::SerReader, prelude::{CsvReadOptions, DataType}};

use crate::error::{Error, Result};
use crate::traverse::{TraverseRecord, TRAVERSE_COLUMNS};

/// Read a traverse table from a CSV file. The header row is skipped and
/// columns are taken by position.
pub fn read_traverse(path: &Path) -> Result<Vec<TraverseRecord>> {
    let file = File::open(path)?;
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .into_reader_with_file_handle(file)
        .finish()?;
    records_from_frame(&df)
}

/// Read a traverse table from CSV text.
pub fn read_traverse_str(csv: &str) -> Result<Vec<TraverseRecord>> {
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .into_reader_with_file_handle(Cursor::new(csv.as_bytes().to_vec()))
        .finish()?;
    records_from_frame(&df)
}

/// Convert an all-string DataFrame into records, one per row.
fn records_from_frame(df: &DataFrame) -> Result<Vec<TraverseRecord>> {
    if df.width() < TRAVERSE_COLUMNS {
        return Err(Error::ColumnCount(df.width()));
    }

    let columns = df.get_columns()[..TRAVERSE_COLUMNS].iter()
        .map(|col| col.cast(&DataType::String))
        .collect::<std::result::Result<Vec<_>, _>>()?;
    let columns = columns.iter()
        .map(|col| col.str().map(|s| s.into_iter().collect::<Vec<Option<&str>>>()))
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok((0..df.height())
        .map(|row| {
            let fields: Vec<Option<&str>> = columns.iter().map(|col| col[row]).collect();
            TraverseRecord::from_fields(&fields)
        })
        .collect())
}
