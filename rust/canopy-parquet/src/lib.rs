//! Block/column reader over Parquet sources.
//!
//! This crate is the I/O boundary of the canopy workspace: it opens a Parquet
//! file, parses the footer exactly once, and serves bulk reads of a single
//! column restricted to a single row group (a "block"). Everything above it
//! (indexing, hierarchy synthesis, caching) works in terms of block ordinals
//! and row offsets and never touches the file directly.

pub mod block;
pub mod schema;
pub mod source;

pub use block::ColumnBlock;
pub use schema::{PhysicalType, SourceSchema};
pub use source::ParquetSource;
