//! Path index: the eager mapping from leaf path to physical location.

use ahash::AHashMap;
use canopy_common::{Result, error::Error};
use canopy_parquet::{ColumnBlock, ParquetSource, PhysicalType};

use crate::path::NodePath;

/// The reserved column whose values determine hierarchical placement.
pub const PATH_COLUMN: &str = "path";

/// Physical location of one indexed path: block ordinal plus row offset
/// within that block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathLocation {
    pub block: usize,
    pub row: usize,
}

/// Mapping from leaf path to [`PathLocation`], covering exactly the paths
/// explicitly present in the `path` column.
///
/// Built once at open by a single bulk scan of the path column; immutable
/// afterwards. First-appearance order is retained so downstream consumers
/// (hierarchy derivation, traversal) are deterministic.
#[derive(Debug, Default)]
pub struct PathIndex {
    paths: Vec<NodePath>,
    locations: AHashMap<NodePath, PathLocation>,
    skipped_rows: usize,
}

impl PathIndex {
    /// Scans the path column of every block, in block order, and indexes each
    /// value that parses as an absolute path.
    ///
    /// Malformed, relative, or null values are skipped and logged; they are a
    /// data-quality concern, not a structural failure. Duplicate paths are
    /// treated as corrections: the later row's location wins. Any I/O or
    /// decode failure aborts the open, so no partial index escapes.
    pub fn scan(source: &ParquetSource) -> Result<PathIndex> {
        let schema = source.schema();
        let Some(path_col) = schema.find(PATH_COLUMN) else {
            return Err(Error::missing_path_column(
                source.path().display().to_string(),
            ));
        };
        match PhysicalType::from_arrow(PATH_COLUMN, schema.data_type(path_col)) {
            Ok(PhysicalType::Utf8) => {}
            _ => return Err(Error::invalid_format(PATH_COLUMN)),
        }

        let mut index = PathIndex::default();
        for block in 0..source.block_count() {
            let col = source.read_column_block(path_col, block)?;
            let ColumnBlock::Utf8(values) = &col else {
                return Err(Error::invalid_format(PATH_COLUMN));
            };
            for row in 0..col.len() {
                if col.is_null(row) {
                    log::debug!("skipping null path value at block {block} row {row}");
                    index.skipped_rows += 1;
                    continue;
                }
                let text = values.value(row);
                match NodePath::parse(text) {
                    Some(path) => index.insert(path, PathLocation { block, row }),
                    None => {
                        log::debug!(
                            "skipping malformed path value '{text}' at block {block} row {row}"
                        );
                        index.skipped_rows += 1;
                    }
                }
            }
        }
        if index.skipped_rows > 0 {
            log::warn!(
                "skipped {} row(s) with malformed path values while indexing '{}'",
                index.skipped_rows,
                source.path().display()
            );
        }
        Ok(index)
    }

    /// Last write wins on duplicates; the path keeps its first-appearance
    /// position in the ordering.
    pub(crate) fn insert(&mut self, path: NodePath, location: PathLocation) {
        if self.locations.insert(path.clone(), location).is_none() {
            self.paths.push(path);
        }
    }

    pub fn contains(&self, path: &NodePath) -> bool {
        self.locations.contains_key(path)
    }

    pub fn location(&self, path: &NodePath) -> Option<PathLocation> {
        self.locations.get(path).copied()
    }

    /// Indexed paths in order of first appearance in the source.
    pub fn paths(&self) -> &[NodePath] {
        &self.paths
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Rows excluded from the index because their path value did not parse.
    pub fn skipped_row_count(&self) -> usize {
        self.skipped_rows
    }
}
