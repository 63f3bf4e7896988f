mod open_scenarios;

use arrow_array::RecordBatch;

use crate::{ParquetTreeData, ParquetTreeOptions, TreePath};

/// Writes the batch to a temp Parquet file and opens it. The temp file is
/// returned alongside the tree because block reads reopen it by path.
pub fn open_tree(
    batch: &RecordBatch,
    row_group_size: usize,
) -> (tempfile::NamedTempFile, ParquetTreeData) {
    let file = canopy_testkit::write_parquet(batch, row_group_size).unwrap();
    let tree = ParquetTreeOptions::new().open(file.path()).unwrap();
    (file, tree)
}

pub fn tree_path(text: &str) -> TreePath {
    TreePath::parse(text).unwrap()
}
