//! Materialized column blocks.

use arrow_array::{
    Array, ArrayRef, BooleanArray, Float32Array, Float64Array, Int32Array, Int64Array, StringArray,
};
use arrow_schema::DataType;
use canopy_common::{Result, error::Error};

use crate::schema::PhysicalType;

/// One column of one row group, fully decoded into a concrete Arrow array.
///
/// A block is the unit of lazy I/O: callers materialize it once and then
/// answer every per-row query against it in memory. The variant set mirrors
/// [`PhysicalType`] exactly.
#[derive(Debug, Clone)]
pub enum ColumnBlock {
    Float32(Float32Array),
    Float64(Float64Array),
    Int32(Int32Array),
    Int64(Int64Array),
    Boolean(BooleanArray),
    Utf8(StringArray),
}

impl ColumnBlock {
    /// Converts a freshly read Arrow array into the block representation for
    /// the column's physical type.
    ///
    /// String arrays that arrive as `LargeUtf8` or `Utf8View` are cast to a
    /// plain `StringArray` so that downstream row access is uniform.
    pub fn from_array(column: &str, physical: PhysicalType, array: &ArrayRef) -> Result<ColumnBlock> {
        match physical {
            PhysicalType::Float32 => Ok(ColumnBlock::Float32(downcast(column, array)?)),
            PhysicalType::Float64 => Ok(ColumnBlock::Float64(downcast(column, array)?)),
            PhysicalType::Int32 => Ok(ColumnBlock::Int32(downcast(column, array)?)),
            PhysicalType::Int64 => Ok(ColumnBlock::Int64(downcast(column, array)?)),
            PhysicalType::Boolean => Ok(ColumnBlock::Boolean(downcast(column, array)?)),
            PhysicalType::Utf8 => {
                if array.data_type() == &DataType::Utf8 {
                    Ok(ColumnBlock::Utf8(downcast(column, array)?))
                } else {
                    let cast = arrow_cast::cast(array, &DataType::Utf8)
                        .map_err(|e| Error::arrow(column.to_string(), e))?;
                    Ok(ColumnBlock::Utf8(downcast(column, &cast)?))
                }
            }
        }
    }

    /// An empty block of the given physical type, for zero-row row groups.
    pub fn empty(physical: PhysicalType) -> ColumnBlock {
        match physical {
            PhysicalType::Float32 => ColumnBlock::Float32(Float32Array::from(Vec::<f32>::new())),
            PhysicalType::Float64 => ColumnBlock::Float64(Float64Array::from(Vec::<f64>::new())),
            PhysicalType::Int32 => ColumnBlock::Int32(Int32Array::from(Vec::<i32>::new())),
            PhysicalType::Int64 => ColumnBlock::Int64(Int64Array::from(Vec::<i64>::new())),
            PhysicalType::Boolean => ColumnBlock::Boolean(BooleanArray::from(Vec::<bool>::new())),
            PhysicalType::Utf8 => ColumnBlock::Utf8(StringArray::from(Vec::<&str>::new())),
        }
    }

    pub fn physical_type(&self) -> PhysicalType {
        match self {
            ColumnBlock::Float32(_) => PhysicalType::Float32,
            ColumnBlock::Float64(_) => PhysicalType::Float64,
            ColumnBlock::Int32(_) => PhysicalType::Int32,
            ColumnBlock::Int64(_) => PhysicalType::Int64,
            ColumnBlock::Boolean(_) => PhysicalType::Boolean,
            ColumnBlock::Utf8(_) => PhysicalType::Utf8,
        }
    }

    /// Number of rows in the block.
    pub fn len(&self) -> usize {
        match self {
            ColumnBlock::Float32(a) => a.len(),
            ColumnBlock::Float64(a) => a.len(),
            ColumnBlock::Int32(a) => a.len(),
            ColumnBlock::Int64(a) => a.len(),
            ColumnBlock::Boolean(a) => a.len(),
            ColumnBlock::Utf8(a) => a.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether the value slot at `row` is null.
    pub fn is_null(&self, row: usize) -> bool {
        match self {
            ColumnBlock::Float32(a) => a.is_null(row),
            ColumnBlock::Float64(a) => a.is_null(row),
            ColumnBlock::Int32(a) => a.is_null(row),
            ColumnBlock::Int64(a) => a.is_null(row),
            ColumnBlock::Boolean(a) => a.is_null(row),
            ColumnBlock::Utf8(a) => a.is_null(row),
        }
    }
}

fn downcast<A>(column: &str, array: &ArrayRef) -> Result<A>
where
    A: Array + Clone + 'static,
{
    array
        .as_any()
        .downcast_ref::<A>()
        .cloned()
        .ok_or_else(|| Error::invalid_format(column))
}
