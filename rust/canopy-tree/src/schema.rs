//! Attribute schema derived from the source column set.

use std::sync::Arc;

use ahash::AHashMap;
use canopy_parquet::{PhysicalType, SourceSchema};

use crate::{field::ValueType, index::PATH_COLUMN};

/// One attribute: its name (the source column name), declared value type,
/// and source column ordinal.
#[derive(Debug, Clone)]
pub struct AttrDescriptor {
    pub name: Arc<str>,
    pub value_type: ValueType,
    pub column: usize,
}

/// Ordered set of attribute descriptors: every source column except the
/// reserved `path` column, restricted to supported physical types.
///
/// Fixed for the lifetime of an opened source; read once from its metadata.
#[derive(Debug, Clone, Default)]
pub struct PropertySchema {
    attrs: Vec<AttrDescriptor>,
    by_name: AHashMap<Arc<str>, usize>,
}

impl PropertySchema {
    /// Derives the attribute set from the source schema.
    ///
    /// Columns whose physical type falls outside the supported set are
    /// excluded here, once, with a warning; the rest of the crate then treats
    /// them as absent everywhere while the source stays usable.
    pub fn from_source(schema: &SourceSchema) -> PropertySchema {
        let mut attrs = Vec::new();
        let mut by_name = AHashMap::new();
        for column in 0..schema.column_count() {
            let name = schema.name(column);
            if name == PATH_COLUMN {
                continue;
            }
            match PhysicalType::from_arrow(name, schema.data_type(column)) {
                Ok(physical) => {
                    let name: Arc<str> = Arc::from(name);
                    by_name.insert(name.clone(), attrs.len());
                    attrs.push(AttrDescriptor {
                        name,
                        value_type: physical.into(),
                        column,
                    });
                }
                Err(e) => {
                    log::warn!("dropping attribute column: {e}");
                }
            }
        }
        PropertySchema { attrs, by_name }
    }

    pub fn find(&self, name: &str) -> Option<&AttrDescriptor> {
        self.by_name.get(name).map(|&i| &self.attrs[i])
    }

    /// Descriptors in schema (source column) order.
    pub fn attrs(&self) -> &[AttrDescriptor] {
        &self.attrs
    }

    /// Attribute names in schema order.
    pub fn names(&self) -> Vec<Arc<str>> {
        self.attrs.iter().map(|a| a.name.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.attrs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attrs.is_empty()
    }
}
