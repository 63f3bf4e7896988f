//! # Canopy: a hierarchical attribute-tree view over columnar data
//!
//! Canopy presents a block-columnar Parquet file as a path-addressed
//! attribute tree. A source declares its hierarchy in a single reserved
//! `path` column (absolute, slash-delimited paths, one per row); every other
//! column becomes a typed attribute on the node named by that row.
//!
//! Opening a source is the only whole-column operation: it scans the path
//! column once to build a path index, then synthesizes the intermediate
//! ancestor nodes so existence and children queries work for the complete
//! tree. Attribute values stay on disk until queried; the first access to a
//! row loads exactly one column block (Parquet row group) and caches it,
//! bounded with LRU eviction, so every other row of that block is served
//! from memory.
//!
//! The produced tree is read-only. Mutation entry points exist so a host
//! can wire the full data surface, but each fails fast, and time-sample
//! queries deterministically report "no samples". Composition with other
//! sources (sublayering, override resolution) is the host's concern: every
//! node here is an override that augments a node resolved elsewhere.
//!
//! ## Module Organization
//!
//! * [`common`] - error type and result helpers shared across components
//! * [`parquet`] - block/column reader over the backing Parquet file
//! * [`tree`] - path index, hierarchy synthesis, block cache, and the
//!   [`tree::TreeData`] query surface
//!
//! ## Getting Started
//!
//! ```no_run
//! use canopy::tree::{Field, ParquetTreeOptions, TreeData, TreePath};
//!
//! # fn main() -> canopy::common::Result<()> {
//! let tree = ParquetTreeOptions::new().open("scene.parquet")?;
//! let attr = TreePath::parse("/World/Sphere1.temperature").unwrap();
//! let value = tree.get(&attr, Field::Default)?;
//! # Ok(())
//! # }
//! ```

pub use canopy_common as common;
pub use canopy_parquet as parquet;
pub use canopy_tree as tree;
