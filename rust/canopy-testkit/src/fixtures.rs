//! Parquet fixture generation.

use std::sync::Arc;

use arrow_array::{ArrayRef, Float64Array, RecordBatch, StringArray};
use arrow_schema::{DataType, Field, Schema};
use parquet::{arrow::ArrowWriter, file::properties::WriterProperties};

/// Writes a record batch to a temporary Parquet file.
///
/// `max_row_group_size` controls block granularity: a value smaller than the
/// batch's row count forces a multi-block file, which is how tests exercise
/// cross-block indexing and per-block lazy loading.
///
/// The returned temp file is deleted on drop; keep it alive for as long as
/// anything reads the source by path.
pub fn write_parquet(
    batch: &RecordBatch,
    max_row_group_size: usize,
) -> anyhow::Result<tempfile::NamedTempFile> {
    assert_ne!(max_row_group_size, 0);
    let file = tempfile::NamedTempFile::new()?;
    let props = WriterProperties::builder()
        .set_max_row_group_size(max_row_group_size)
        .build();
    let mut writer = ArrowWriter::try_new(file.reopen()?, batch.schema(), Some(props))?;
    writer.write(batch)?;
    writer.close()?;
    Ok(file)
}

/// The canonical two-node scene used across the test suite.
///
/// Rows: `/World/Sphere1` (temperature 20.0, pressure 101325.0) and
/// `/World/Cube1` (temperature 25.0, pressure 101325.0), in that order.
pub fn sample_scene() -> RecordBatch {
    let schema = Arc::new(Schema::new(vec![
        Field::new("path", DataType::Utf8, false),
        Field::new("temperature", DataType::Float64, true),
        Field::new("pressure", DataType::Float64, true),
    ]));
    let paths: ArrayRef = Arc::new(StringArray::from(vec!["/World/Sphere1", "/World/Cube1"]));
    let temperature: ArrayRef = Arc::new(Float64Array::from(vec![20.0, 25.0]));
    let pressure: ArrayRef = Arc::new(Float64Array::from(vec![101325.0, 101325.0]));
    RecordBatch::try_new(schema, vec![paths, temperature, pressure]).expect("sample scene batch")
}
