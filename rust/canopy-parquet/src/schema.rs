//! Source schema metadata and the closed set of supported physical types.

use arrow_schema::{DataType, Field, SchemaRef};
use canopy_common::{Result, error::Error};

/// The closed set of physical value encodings this crate can materialize.
///
/// Every Arrow data type outside this set is rejected with
/// `ErrorKind::UnsupportedColumnType` at the point where a column is first
/// examined; adding a new supported encoding requires extending this enum and
/// every match over it, which the compiler enforces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhysicalType {
    Float32,
    Float64,
    Int32,
    Int64,
    Boolean,
    Utf8,
}

impl PhysicalType {
    /// Maps an Arrow data type onto the supported physical type set.
    ///
    /// The three Arrow string encodings (`Utf8`, `LargeUtf8`, `Utf8View`) all
    /// normalize to [`PhysicalType::Utf8`]; block materialization casts them
    /// to a plain `StringArray`.
    pub fn from_arrow(column: &str, data_type: &DataType) -> Result<PhysicalType> {
        match data_type {
            DataType::Float32 => Ok(PhysicalType::Float32),
            DataType::Float64 => Ok(PhysicalType::Float64),
            DataType::Int32 => Ok(PhysicalType::Int32),
            DataType::Int64 => Ok(PhysicalType::Int64),
            DataType::Boolean => Ok(PhysicalType::Boolean),
            DataType::Utf8 | DataType::LargeUtf8 | DataType::Utf8View => Ok(PhysicalType::Utf8),
            other => Err(Error::unsupported_column_type(column, other.to_string())),
        }
    }
}

impl std::fmt::Display for PhysicalType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PhysicalType::Float32 => "float32",
            PhysicalType::Float64 => "float64",
            PhysicalType::Int32 => "int32",
            PhysicalType::Int64 => "int64",
            PhysicalType::Boolean => "boolean",
            PhysicalType::Utf8 => "utf8",
        };
        f.write_str(name)
    }
}

/// Column names and Arrow data types of an opened source, read once from the
/// file footer and fixed for the lifetime of the source.
#[derive(Debug, Clone)]
pub struct SourceSchema {
    schema: SchemaRef,
}

impl SourceSchema {
    pub(crate) fn new(schema: SchemaRef) -> SourceSchema {
        SourceSchema { schema }
    }

    pub fn column_count(&self) -> usize {
        self.schema.fields().len()
    }

    pub fn field(&self, column: usize) -> &Field {
        self.schema.field(column)
    }

    pub fn name(&self, column: usize) -> &str {
        self.schema.field(column).name()
    }

    pub fn data_type(&self, column: usize) -> &DataType {
        self.schema.field(column).data_type()
    }

    /// Resolves a column name to its ordinal, `None` when absent.
    pub fn find(&self, name: &str) -> Option<usize> {
        self.schema.fields().iter().position(|f| f.name() == name)
    }
}
