//! Queryable fields and the host-facing value model.

use std::sync::Arc;

use canopy_parquet::PhysicalType;

/// The closed set of field identifiers a path can be queried for.
///
/// Declaration order matches the alphabetical order of the canonical field
/// names, so the derived `Ord` yields the sorted order `list_fields`
/// guarantees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    AttributeChildren,
    Children,
    Custom,
    Default,
    Specifier,
    TypeName,
    Variability,
}

impl Field {
    pub fn name(&self) -> &'static str {
        match self {
            Field::AttributeChildren => "attributeChildren",
            Field::Children => "children",
            Field::Custom => "custom",
            Field::Default => "default",
            Field::Specifier => "specifier",
            Field::TypeName => "typeName",
            Field::Variability => "variability",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Declared type of an attribute, derived from the source column's physical
/// type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    Bool,
    Double,
    Float,
    Int,
    Int64,
    String,
}

impl ValueType {
    pub fn name(&self) -> &'static str {
        match self {
            ValueType::Bool => "bool",
            ValueType::Double => "double",
            ValueType::Float => "float",
            ValueType::Int => "int",
            ValueType::Int64 => "int64",
            ValueType::String => "string",
        }
    }
}

impl From<PhysicalType> for ValueType {
    fn from(physical: PhysicalType) -> ValueType {
        match physical {
            PhysicalType::Float32 => ValueType::Float,
            PhysicalType::Float64 => ValueType::Double,
            PhysicalType::Int32 => ValueType::Int,
            PhysicalType::Int64 => ValueType::Int64,
            PhysicalType::Boolean => ValueType::Bool,
            PhysicalType::Utf8 => ValueType::String,
        }
    }
}

impl std::fmt::Display for ValueType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// One attribute value, converted from the column's physical encoding.
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    Bool(bool),
    Double(f64),
    Float(f32),
    Int(i32),
    Int64(i64),
    String(String),
}

impl AttrValue {
    pub fn value_type(&self) -> ValueType {
        match self {
            AttrValue::Bool(_) => ValueType::Bool,
            AttrValue::Double(_) => ValueType::Double,
            AttrValue::Float(_) => ValueType::Float,
            AttrValue::Int(_) => ValueType::Int,
            AttrValue::Int64(_) => ValueType::Int64,
            AttrValue::String(_) => ValueType::String,
        }
    }
}

/// How a node contributes to the host's composed tree.
///
/// Every node this source produces augments a node the host resolves
/// elsewhere; it never defines one from scratch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Specifier {
    Override,
}

/// Whether an attribute's value may differ per node. Attribute values here
/// always do, since each node row carries its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variability {
    Varying,
}

/// Structural classification of an addressable path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Root,
    Node,
    Attribute,
}

/// Result of a field query.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Immediate child node names, in order of first discovery.
    Children(Vec<Arc<str>>),
    /// Attribute names, in schema order.
    Attributes(Vec<Arc<str>>),
    /// An attribute's default value.
    Value(AttrValue),
    TypeName(ValueType),
    Variability(Variability),
    Custom(bool),
    Specifier(Specifier),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_order_is_canonical_name_order() {
        let mut fields = vec![
            Field::Variability,
            Field::Children,
            Field::Default,
            Field::AttributeChildren,
            Field::TypeName,
            Field::Custom,
            Field::Specifier,
        ];
        fields.sort();
        let names: Vec<_> = fields.iter().map(Field::name).collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
    }

    #[test]
    fn value_type_tracks_physical_type() {
        assert_eq!(ValueType::from(PhysicalType::Float32), ValueType::Float);
        assert_eq!(ValueType::from(PhysicalType::Float64), ValueType::Double);
        assert_eq!(ValueType::from(PhysicalType::Int32), ValueType::Int);
        assert_eq!(ValueType::from(PhysicalType::Int64), ValueType::Int64);
        assert_eq!(ValueType::from(PhysicalType::Boolean), ValueType::Bool);
        assert_eq!(ValueType::from(PhysicalType::Utf8), ValueType::String);
    }

    #[test]
    fn attr_value_declares_its_type() {
        assert_eq!(AttrValue::Double(1.0).value_type(), ValueType::Double);
        assert_eq!(
            AttrValue::String("x".into()).value_type(),
            ValueType::String
        );
    }
}
