//! Opened Parquet source with per-block, per-column bulk reads.

use std::{
    fs::File,
    path::{Path, PathBuf},
    sync::atomic::{AtomicU64, Ordering},
};

use canopy_common::{Result, error::Error, verify_arg, verify_data};
use parquet::arrow::{
    ProjectionMask,
    arrow_reader::{ArrowReaderMetadata, ArrowReaderOptions, ParquetRecordBatchReaderBuilder},
};

use crate::{
    block::ColumnBlock,
    schema::{PhysicalType, SourceSchema},
};

/// An opened columnar source.
///
/// The file footer (schema, row-group metadata) is parsed exactly once at
/// open; every subsequent [`ParquetSource::read_column_block`] call reopens
/// the file handle and reuses the pre-loaded metadata, so the cost of a read
/// is proportional to one column chunk of one row group, never to the whole
/// file.
pub struct ParquetSource {
    path: PathBuf,
    metadata: ArrowReaderMetadata,
    schema: SourceSchema,
    block_rows: Vec<usize>,
    column_reads: AtomicU64,
}

impl ParquetSource {
    /// Opens the file and loads its metadata. Any failure here (unreadable
    /// file, corrupt footer) aborts the open outright.
    pub fn open(path: impl AsRef<Path>) -> Result<ParquetSource> {
        let path = path.as_ref().to_path_buf();
        let file =
            File::open(&path).map_err(|e| Error::io(path.display().to_string(), e))?;
        let metadata = ArrowReaderMetadata::load(&file, ArrowReaderOptions::new())
            .map_err(|e| Error::parquet(path.display().to_string(), e))?;
        let block_rows = metadata
            .metadata()
            .row_groups()
            .iter()
            .map(|rg| rg.num_rows() as usize)
            .collect();
        let schema = SourceSchema::new(metadata.schema().clone());
        Ok(ParquetSource {
            path,
            metadata,
            schema,
            block_rows,
            column_reads: AtomicU64::new(0),
        })
    }

    /// The resolved file path this source was opened from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn schema(&self) -> &SourceSchema {
        &self.schema
    }

    /// Number of independently readable blocks (row groups).
    pub fn block_count(&self) -> usize {
        self.block_rows.len()
    }

    /// Row count of each block, in block order.
    pub fn block_row_counts(&self) -> &[usize] {
        &self.block_rows
    }

    pub fn total_row_count(&self) -> usize {
        self.block_rows.iter().sum()
    }

    /// Count of bulk column-block reads performed so far. Tests use the delta
    /// of this counter to observe that caching suppresses repeat I/O.
    pub fn column_reads(&self) -> u64 {
        self.column_reads.load(Ordering::Relaxed)
    }

    /// Reads one column of one block in a single bulk operation.
    ///
    /// The read is restricted with a projection mask and a row-group
    /// selection; the batch size equals the block's row count, so exactly one
    /// record batch comes back.
    pub fn read_column_block(&self, column: usize, block: usize) -> Result<ColumnBlock> {
        verify_arg!(column, column < self.schema.column_count());
        verify_arg!(block, block < self.block_rows.len());

        let name = self.schema.name(column);
        let physical = PhysicalType::from_arrow(name, self.schema.data_type(column))?;
        let rows = self.block_rows[block];
        if rows == 0 {
            return Ok(ColumnBlock::empty(physical));
        }

        let file =
            File::open(&self.path).map_err(|e| Error::io(self.path.display().to_string(), e))?;
        let builder = ParquetRecordBatchReaderBuilder::new_with_metadata(file, self.metadata.clone());
        let mask = ProjectionMask::leaves(builder.parquet_schema(), [column]);
        let mut reader = builder
            .with_projection(mask)
            .with_row_groups(vec![block])
            .with_batch_size(rows)
            .build()
            .map_err(|e| Error::parquet(name.to_string(), e))?;
        self.column_reads.fetch_add(1, Ordering::Relaxed);

        let batch = match reader.next() {
            Some(batch) => batch.map_err(|e| Error::arrow(name.to_string(), e))?,
            None => return Err(Error::invalid_format(name)),
        };
        verify_data!(batch, batch.num_columns() == 1);
        verify_data!(batch, batch.num_rows() == rows);
        ColumnBlock::from_array(name, physical, batch.column(0))
    }
}

impl std::fmt::Debug for ParquetSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParquetSource")
            .field("path", &self.path)
            .field("blocks", &self.block_rows)
            .field("column_reads", &self.column_reads)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use arrow_array::{Float64Array, RecordBatch, StringArray};
    use arrow_schema::{DataType, Field, Schema};

    fn sample_file(row_group_size: usize) -> tempfile::NamedTempFile {
        let schema = Arc::new(Schema::new(vec![
            Field::new("path", DataType::Utf8, false),
            Field::new("temperature", DataType::Float64, true),
        ]));
        let batch = RecordBatch::try_new(
            schema,
            vec![
                Arc::new(StringArray::from(vec![
                    "/World/Sphere1",
                    "/World/Cube1",
                    "/World/Cone1",
                    "/World/Disk1",
                ])),
                Arc::new(Float64Array::from(vec![20.0, 25.0, 30.0, 35.0])),
            ],
        )
        .unwrap();
        canopy_testkit::write_parquet(&batch, row_group_size).unwrap()
    }

    #[test]
    fn open_reads_footer_metadata() {
        let file = sample_file(2);
        let source = ParquetSource::open(file.path()).unwrap();
        assert_eq!(source.block_count(), 2);
        assert_eq!(source.block_row_counts(), &[2, 2]);
        assert_eq!(source.total_row_count(), 4);
        assert_eq!(source.schema().find("path"), Some(0));
        assert_eq!(source.column_reads(), 0);
    }

    #[test]
    fn reads_exactly_one_block_of_one_column() {
        let file = sample_file(2);
        let source = ParquetSource::open(file.path()).unwrap();
        let block = source.read_column_block(1, 1).unwrap();
        assert_eq!(source.column_reads(), 1);
        match block {
            ColumnBlock::Float64(values) => {
                assert_eq!(values.len(), 2);
                assert_eq!(values.value(0), 30.0);
                assert_eq!(values.value(1), 35.0);
            }
            other => panic!("unexpected block: {other:?}"),
        }
    }

    #[test]
    fn rejects_out_of_range_coordinates() {
        let file = sample_file(4);
        let source = ParquetSource::open(file.path()).unwrap();
        assert!(source.read_column_block(2, 0).is_err());
        assert!(source.read_column_block(0, 1).is_err());
    }

    #[test]
    fn open_fails_for_missing_file() {
        assert!(ParquetSource::open("/nonexistent/source.parquet").is_err());
    }
}
