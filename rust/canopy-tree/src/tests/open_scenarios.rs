use std::sync::Arc;

use arrow_array::{ArrayRef, Float64Array, RecordBatch, StringArray};
use arrow_schema::{DataType, Field as ArrowField, Schema};
use canopy_common::error::ErrorKind;

use super::{open_tree, tree_path};
use crate::{Field, FieldValue, ParquetTreeOptions, TreeData, TreePath};

#[test]
fn malformed_and_null_path_values_are_skipped() {
    let schema = Arc::new(Schema::new(vec![
        ArrowField::new("path", DataType::Utf8, true),
        ArrowField::new("temperature", DataType::Float64, true),
    ]));
    let batch = RecordBatch::try_new(
        schema,
        vec![
            Arc::new(StringArray::from(vec![
                Some("NotAbsolute"),
                Some("/World/Ok"),
                None,
                Some("relative/x"),
            ])) as ArrayRef,
            Arc::new(Float64Array::from(vec![1.0, 2.0, 3.0, 4.0])) as ArrayRef,
        ],
    )
    .unwrap();
    let (_file, tree) = open_tree(&batch, 1024);

    assert_eq!(tree.index().len(), 1);
    assert_eq!(tree.index().skipped_row_count(), 3);
    assert!(tree.exists(&tree_path("/World/Ok")));
    assert!(!tree.exists(&tree_path("/NotAbsolute")));
    assert_eq!(
        tree.get(&tree_path("/World/Ok.temperature"), Field::Default)
            .unwrap(),
        Some(FieldValue::Value(crate::AttrValue::Double(2.0)))
    );
}

#[test]
fn missing_path_column_fails_open() {
    let schema = Arc::new(Schema::new(vec![ArrowField::new(
        "temperature",
        DataType::Float64,
        true,
    )]));
    let batch = RecordBatch::try_new(
        schema,
        vec![Arc::new(Float64Array::from(vec![20.0])) as ArrayRef],
    )
    .unwrap();
    let file = canopy_testkit::write_parquet(&batch, 1024).unwrap();

    let err = ParquetTreeOptions::new().open(file.path()).unwrap_err();
    assert!(matches!(
        err.kind(),
        ErrorKind::MissingPathColumn { .. }
    ));
}

#[test]
fn non_string_path_column_fails_open() {
    let schema = Arc::new(Schema::new(vec![
        ArrowField::new("path", DataType::Float64, false),
        ArrowField::new("temperature", DataType::Float64, true),
    ]));
    let batch = RecordBatch::try_new(
        schema,
        vec![
            Arc::new(Float64Array::from(vec![1.0])) as ArrayRef,
            Arc::new(Float64Array::from(vec![20.0])) as ArrayRef,
        ],
    )
    .unwrap();
    let file = canopy_testkit::write_parquet(&batch, 1024).unwrap();

    assert!(ParquetTreeOptions::new().open(file.path()).is_err());
}

#[test]
fn unreadable_file_fails_open() {
    assert!(
        ParquetTreeOptions::new()
            .open("/nonexistent/scene.parquet")
            .is_err()
    );
}

#[test]
fn empty_source_has_only_the_root() {
    let schema = Arc::new(Schema::new(vec![
        ArrowField::new("path", DataType::Utf8, false),
        ArrowField::new("temperature", DataType::Float64, true),
    ]));
    let batch = RecordBatch::try_new(
        schema,
        vec![
            Arc::new(StringArray::from(Vec::<&str>::new())) as ArrayRef,
            Arc::new(Float64Array::from(Vec::<f64>::new())) as ArrayRef,
        ],
    )
    .unwrap();
    let (_file, tree) = open_tree(&batch, 1024);

    assert!(tree.index().is_empty());
    assert!(tree.exists(&TreePath::root()));
    assert_eq!(
        tree.get(&TreePath::root(), Field::Children).unwrap(),
        Some(FieldValue::Children(Vec::new()))
    );
    assert!(!tree.exists(&tree_path("/World")));
}

#[test]
fn double_open_yields_identical_contents() {
    let schema = Arc::new(Schema::new(vec![
        ArrowField::new("path", DataType::Utf8, false),
        ArrowField::new("temperature", DataType::Float64, true),
    ]));
    let batch = RecordBatch::try_new(
        schema,
        vec![
            Arc::new(StringArray::from(vec![
                "/World/Sphere1",
                "/World/Cube1",
                "/Other/Deep/Leaf",
                "/World/Sphere1",
            ])) as ArrayRef,
            Arc::new(Float64Array::from(vec![1.0, 2.0, 3.0, 4.0])) as ArrayRef,
        ],
    )
    .unwrap();
    let file = canopy_testkit::write_parquet(&batch, 2).unwrap();

    let a = ParquetTreeOptions::new().open(file.path()).unwrap();
    let b = ParquetTreeOptions::new().open(file.path()).unwrap();

    assert_eq!(a.index().paths(), b.index().paths());
    for path in a.index().paths() {
        assert_eq!(a.index().location(path), b.index().location(path));
    }
    assert_eq!(a.hierarchy().all_paths(), b.hierarchy().all_paths());
    for path in a.hierarchy().all_paths() {
        assert_eq!(a.hierarchy().children(path), b.hierarchy().children(path));
    }
    assert_eq!(
        a.hierarchy().children(&crate::NodePath::root()),
        b.hierarchy().children(&crate::NodePath::root())
    );
}
