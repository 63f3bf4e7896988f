//! Query dispatcher: the host-facing tree surface over an opened source.

use std::path::Path;
use std::sync::Arc;

use canopy_common::{Result, error::Error, verify_data};
use canopy_parquet::{ColumnBlock, ParquetSource};

use crate::{
    cache::BlockCache,
    field::{AttrValue, Field, FieldValue, NodeKind, Specifier, Variability},
    hierarchy::Hierarchy,
    index::{PathIndex, PathLocation},
    path::{AttrPath, TreePath},
    schema::{AttrDescriptor, PropertySchema},
};

/// Receives every addressable path during [`TreeData::visit`]. Returning
/// `false` stops the traversal immediately.
pub trait TreeVisitor {
    fn visit(&mut self, path: &TreePath) -> bool;
}

/// The query surface a host consumes.
///
/// Everything is request/response over state built at open time; the only
/// I/O after open happens inside default-value queries, through the block
/// cache. The source is read-only for its entire lifetime: the mutation
/// entry points exist so a host can wire the full surface, but every one of
/// them fails fast, and time-sample queries deterministically answer "no
/// samples".
pub trait TreeData: Send + Sync {
    /// Whether the source streams data incrementally. This implementation
    /// builds its whole index eagerly at open; only attribute values are
    /// lazy, so the answer is always `false`.
    fn streams_data(&self) -> bool;

    /// True iff `path` is the root, a known node, or a valid attribute path.
    fn exists(&self, path: &TreePath) -> bool;

    /// Structural classification of `path`, `None` when unknown.
    fn node_kind(&self, path: &TreePath) -> Option<NodeKind>;

    /// Queries one field on one path. Unknown path/field combinations answer
    /// `Ok(None)`, never an error.
    fn get(&self, path: &TreePath, field: Field) -> Result<Option<FieldValue>>;

    /// The minimal, sorted set of fields `path` supports.
    fn list_fields(&self, path: &TreePath) -> Vec<Field>;

    /// Visits the root, every known node path, and every attribute path of
    /// every node backed by a source row, each exactly once. Node order is
    /// not hierarchical. Stops as soon as the visitor declines.
    fn visit(&self, visitor: &mut dyn TreeVisitor);

    fn set(&mut self, path: &TreePath, field: Field, value: FieldValue) -> Result<()>;
    fn erase(&mut self, path: &TreePath, field: Field) -> Result<()>;
    fn create_node(&mut self, path: &TreePath, kind: NodeKind) -> Result<()>;
    fn erase_node(&mut self, path: &TreePath) -> Result<()>;
    fn move_node(&mut self, from: &TreePath, to: &TreePath) -> Result<()>;

    fn all_sample_times(&self) -> Vec<f64>;
    fn sample_times_for(&self, path: &TreePath) -> Vec<f64>;
    fn bracketing_sample_times(&self, time: f64) -> Option<(f64, f64)>;
    fn bracketing_sample_times_for(&self, path: &TreePath, time: f64) -> Option<(f64, f64)>;
    fn sample_count_for(&self, path: &TreePath) -> usize;
    fn query_sample(&self, path: &TreePath, time: f64) -> Option<AttrValue>;
    fn set_time_sample(&mut self, path: &TreePath, time: f64, value: AttrValue) -> Result<()>;
    fn erase_time_sample(&mut self, path: &TreePath, time: f64) -> Result<()>;
}

/// Open options for a Parquet-backed tree.
#[derive(Debug, Clone)]
pub struct ParquetTreeOptions {
    max_resident_blocks: usize,
}

impl Default for ParquetTreeOptions {
    fn default() -> Self {
        ParquetTreeOptions {
            max_resident_blocks: 1024,
        }
    }
}

impl ParquetTreeOptions {
    pub fn new() -> ParquetTreeOptions {
        Default::default()
    }

    /// Bounds the number of column blocks the cache keeps resident; the
    /// least recently used block is dropped when the bound is exceeded.
    pub fn with_max_resident_blocks(mut self, max_resident_blocks: usize) -> ParquetTreeOptions {
        self.max_resident_blocks = max_resident_blocks;
        self
    }

    /// Opens `path` and builds the full index and hierarchy.
    ///
    /// This is the only phase that touches the entire path column; its cost
    /// is proportional to the source's row count and it runs exactly once
    /// per instance. Attribute columns are not read here.
    pub fn open(&self, path: impl AsRef<Path>) -> Result<ParquetTreeData> {
        let source = ParquetSource::open(path)?;
        let schema = PropertySchema::from_source(source.schema());
        let index = PathIndex::scan(&source)?;
        let hierarchy = Hierarchy::derive(&index);
        Ok(ParquetTreeData {
            source,
            schema,
            index,
            hierarchy,
            cache: BlockCache::new(self.max_resident_blocks),
        })
    }
}

/// An opened Parquet source presented as a hierarchical attribute tree.
///
/// After open everything is immutable except the block cache, which grows
/// (and evicts) under its own lock; queries from many threads are safe.
pub struct ParquetTreeData {
    source: ParquetSource,
    schema: PropertySchema,
    index: PathIndex,
    hierarchy: Hierarchy,
    cache: BlockCache,
}

impl ParquetTreeData {
    pub fn source(&self) -> &ParquetSource {
        &self.source
    }

    pub fn property_schema(&self) -> &PropertySchema {
        &self.schema
    }

    pub fn index(&self) -> &PathIndex {
        &self.index
    }

    pub fn hierarchy(&self) -> &Hierarchy {
        &self.hierarchy
    }

    /// Number of column blocks currently resident in the cache.
    pub fn resident_blocks(&self) -> usize {
        self.cache.len()
    }

    /// Resolves an attribute path against the index and schema; `None` is
    /// the standard not-found answer for every attribute query.
    fn attr_descriptor(&self, attr: &AttrPath) -> Option<(&AttrDescriptor, PathLocation)> {
        let location = self.index.location(attr.node())?;
        let descriptor = self.schema.find(attr.name())?;
        Some((descriptor, location))
    }

    /// Loads (or finds cached) the block holding the attribute's row and
    /// extracts the value. A null slot answers `None` while the attribute
    /// itself stays valid.
    fn default_value(&self, attr: &AttrPath) -> Result<Option<FieldValue>> {
        let Some((descriptor, location)) = self.attr_descriptor(attr) else {
            return Ok(None);
        };
        let block = self.cache.get_or_load(&descriptor.name, location.block, || {
            self.source.read_column_block(descriptor.column, location.block)
        })?;
        verify_data!(row_offset, location.row < block.len());
        if block.is_null(location.row) {
            return Ok(None);
        }
        let value = match block.as_ref() {
            ColumnBlock::Float32(a) => AttrValue::Float(a.value(location.row)),
            ColumnBlock::Float64(a) => AttrValue::Double(a.value(location.row)),
            ColumnBlock::Int32(a) => AttrValue::Int(a.value(location.row)),
            ColumnBlock::Int64(a) => AttrValue::Int64(a.value(location.row)),
            ColumnBlock::Boolean(a) => AttrValue::Bool(a.value(location.row)),
            ColumnBlock::Utf8(a) => AttrValue::String(a.value(location.row).to_string()),
        };
        Ok(Some(FieldValue::Value(value)))
    }

    fn children_of(&self, path: &TreePath) -> Option<Vec<Arc<str>>> {
        let TreePath::Node(node) = path else {
            return None;
        };
        match self.hierarchy.children(node) {
            Some(children) => Some(children.to_vec()),
            // the root always answers the children query, even when empty
            None if node.is_root() => Some(Vec::new()),
            None => None,
        }
    }
}

impl TreeData for ParquetTreeData {
    fn streams_data(&self) -> bool {
        false
    }

    fn exists(&self, path: &TreePath) -> bool {
        match path {
            TreePath::Node(node) => node.is_root() || self.hierarchy.contains(node),
            TreePath::Attribute(attr) => self.attr_descriptor(attr).is_some(),
        }
    }

    fn node_kind(&self, path: &TreePath) -> Option<NodeKind> {
        match path {
            TreePath::Node(node) if node.is_root() => Some(NodeKind::Root),
            TreePath::Node(node) => self.hierarchy.contains(node).then_some(NodeKind::Node),
            TreePath::Attribute(attr) => {
                self.attr_descriptor(attr).map(|_| NodeKind::Attribute)
            }
        }
    }

    fn get(&self, path: &TreePath, field: Field) -> Result<Option<FieldValue>> {
        match (path, field) {
            (TreePath::Node(_), Field::Children) => {
                Ok(self.children_of(path).map(FieldValue::Children))
            }
            (TreePath::Node(node), Field::AttributeChildren) => {
                if self.index.contains(node) && !self.schema.is_empty() {
                    Ok(Some(FieldValue::Attributes(self.schema.names())))
                } else {
                    Ok(None)
                }
            }
            (TreePath::Node(node), Field::Specifier) => Ok(self
                .hierarchy
                .contains(node)
                .then_some(FieldValue::Specifier(Specifier::Override))),
            (TreePath::Attribute(attr), Field::Default) => self.default_value(attr),
            // the declared type comes straight from the schema; no block load
            (TreePath::Attribute(attr), Field::TypeName) => Ok(self
                .attr_descriptor(attr)
                .map(|(d, _)| FieldValue::TypeName(d.value_type))),
            (TreePath::Attribute(attr), Field::Variability) => Ok(self
                .attr_descriptor(attr)
                .map(|_| FieldValue::Variability(Variability::Varying))),
            (TreePath::Attribute(attr), Field::Custom) => {
                Ok(self.attr_descriptor(attr).map(|_| FieldValue::Custom(false)))
            }
            _ => Ok(None),
        }
    }

    fn list_fields(&self, path: &TreePath) -> Vec<Field> {
        let mut fields = Vec::new();
        match path {
            TreePath::Attribute(attr) => {
                if self.attr_descriptor(attr).is_some() {
                    fields.extend([
                        Field::Custom,
                        Field::Default,
                        Field::TypeName,
                        Field::Variability,
                    ]);
                }
            }
            TreePath::Node(node) => {
                if node.is_root() || self.hierarchy.children(node).is_some() {
                    fields.push(Field::Children);
                }
                if self.index.contains(node) && !self.schema.is_empty() {
                    fields.push(Field::AttributeChildren);
                }
                if self.hierarchy.contains(node) {
                    fields.push(Field::Specifier);
                }
            }
        }
        fields.sort();
        fields
    }

    fn visit(&self, visitor: &mut dyn TreeVisitor) {
        if !visitor.visit(&TreePath::root()) {
            return;
        }
        for node in self.hierarchy.all_paths() {
            if !visitor.visit(&TreePath::Node(node.clone())) {
                return;
            }
            if self.index.contains(node) {
                for descriptor in self.schema.attrs() {
                    let attr =
                        TreePath::Attribute(AttrPath::new(node.clone(), descriptor.name.clone()));
                    if !visitor.visit(&attr) {
                        return;
                    }
                }
            }
        }
    }

    fn set(&mut self, _path: &TreePath, _field: Field, _value: FieldValue) -> Result<()> {
        Err(Error::read_only("set"))
    }

    fn erase(&mut self, _path: &TreePath, _field: Field) -> Result<()> {
        Err(Error::read_only("erase"))
    }

    fn create_node(&mut self, _path: &TreePath, _kind: NodeKind) -> Result<()> {
        Err(Error::read_only("create_node"))
    }

    fn erase_node(&mut self, _path: &TreePath) -> Result<()> {
        Err(Error::read_only("erase_node"))
    }

    fn move_node(&mut self, _from: &TreePath, _to: &TreePath) -> Result<()> {
        Err(Error::read_only("move_node"))
    }

    fn all_sample_times(&self) -> Vec<f64> {
        Vec::new()
    }

    fn sample_times_for(&self, _path: &TreePath) -> Vec<f64> {
        Vec::new()
    }

    fn bracketing_sample_times(&self, _time: f64) -> Option<(f64, f64)> {
        None
    }

    fn bracketing_sample_times_for(&self, _path: &TreePath, _time: f64) -> Option<(f64, f64)> {
        None
    }

    fn sample_count_for(&self, _path: &TreePath) -> usize {
        0
    }

    fn query_sample(&self, _path: &TreePath, _time: f64) -> Option<AttrValue> {
        None
    }

    fn set_time_sample(&mut self, _path: &TreePath, _time: f64, _value: AttrValue) -> Result<()> {
        Err(Error::read_only("set_time_sample"))
    }

    fn erase_time_sample(&mut self, _path: &TreePath, _time: f64) -> Result<()> {
        Err(Error::read_only("erase_time_sample"))
    }
}

impl std::fmt::Debug for ParquetTreeData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParquetTreeData")
            .field("source", &self.source)
            .field("indexed_paths", &self.index.len())
            .field("all_paths", &self.hierarchy.len())
            .field("attributes", &self.schema.len())
            .field("resident_blocks", &self.resident_blocks())
            .finish()
    }
}
