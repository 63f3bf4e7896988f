//! Path-indexed lazy tree view over a block-columnar source.
//!
//! This crate exposes an opened Parquet source as a hierarchical,
//! path-addressed attribute tree. At open time it scans only the reserved
//! `path` column to build an index from each path to its physical location,
//! then synthesizes the intermediate ancestors so the tree is structurally
//! complete. Attribute values stay on disk until a query touches a row, at
//! which point exactly one column block is read and cached for every other
//! row that shares it.
//!
//! The main entry point is [`ParquetTreeOptions::open`], which yields a
//! [`ParquetTreeData`] implementing the [`TreeData`] query surface.

pub mod cache;
pub mod data;
pub mod field;
pub mod hierarchy;
pub mod index;
pub mod path;
pub mod schema;

#[cfg(test)]
mod tests;

pub use data::{ParquetTreeData, ParquetTreeOptions, TreeData, TreeVisitor};
pub use field::{AttrValue, Field, FieldValue, NodeKind, Specifier, ValueType, Variability};
pub use path::{AttrPath, NodePath, TreePath};
