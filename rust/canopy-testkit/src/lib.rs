//! Test utilities for the canopy workspace.
//!
//! Provides in-process Parquet fixture writers so tests can produce small
//! sources with controlled row-group layouts without any external tooling.

pub mod fixtures;

pub use fixtures::{sample_scene, write_parquet};
