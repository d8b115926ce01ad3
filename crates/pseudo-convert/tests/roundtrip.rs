//! Integration tests: conversion, column projection and pseudonymization.

use std::fs;
use std::path::Path;

use polars::prelude::{Column, DataFrame, IntoColumn, NamedFrom, Series};
use pseudo_convert::{
    ConvertError, convert_csv_to_parquet, parquet_path_for, pseudonymize_column, read_csv,
    read_parquet_columns, write_parquet,
};
use pseudo_core::{HashError, Salt, WriteError, user_id, write_new};
use tempfile::tempdir;

fn test_df() -> DataFrame {
    let cols: Vec<Column> = vec![
        Series::new("a".into(), vec![1i64, 2]).into_column(),
        Series::new("b".into(), vec!["hello", "world"]).into_column(),
    ];
    DataFrame::new(cols).unwrap()
}

fn test_salt() -> Salt {
    Salt::from_hex("a1b2c3d4e5f60718").unwrap()
}

fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn convert_csv_to_parquet_roundtrip() {
    let dir = tempdir().unwrap();
    let csv = dir.path().join("testfile.csv");
    write_new(&csv, "a,b\n1,hello\n2,world\n").unwrap();

    let parquet = convert_csv_to_parquet(&csv).unwrap();

    assert_eq!(parquet, dir.path().join("testfile.parquet"));
    assert_eq!(parquet, parquet_path_for(&csv));
    assert_eq!(file_names(dir.path()), vec!["testfile.csv", "testfile.parquet"]);

    let expected = read_csv(&csv).unwrap();
    let actual = read_parquet_columns(&parquet, &["a", "b"]).unwrap();
    assert!(expected.equals(&actual));
    assert!(test_df().equals(&actual));
}

#[test]
fn convert_refuses_to_overwrite() {
    let dir = tempdir().unwrap();
    let csv = dir.path().join("users.csv");
    write_new(&csv, "a,b\n1,hello\n").unwrap();
    let parquet = dir.path().join("users.parquet");
    fs::write(&parquet, b"keep me").unwrap();

    let result = convert_csv_to_parquet(&csv);

    assert!(matches!(
        result,
        Err(ConvertError::Write(WriteError::AlreadyExists { .. }))
    ));
    assert_eq!(fs::read(&parquet).unwrap(), b"keep me");
    assert_eq!(file_names(dir.path()), vec!["users.csv", "users.parquet"]);
}

#[test]
fn read_columns_returns_only_requested_columns() {
    let dir = tempdir().unwrap();
    let parquet = dir.path().join("testfile.parquet");
    let mut df = test_df();
    write_parquet(&mut df, &parquet).unwrap();

    let col_a = read_parquet_columns(&parquet, &["a"]).unwrap();
    let col_b = read_parquet_columns(&parquet, &["b"]).unwrap();

    assert!(df.select(["a"]).unwrap().equals(&col_a));
    assert!(df.select(["b"]).unwrap().equals(&col_b));
}

#[test]
fn read_columns_preserves_requested_order() {
    let dir = tempdir().unwrap();
    let parquet = dir.path().join("ordered.parquet");
    let mut df = test_df();
    write_parquet(&mut df, &parquet).unwrap();

    let reordered = read_parquet_columns(&parquet, &["b", "a"]).unwrap();

    let names: Vec<&str> = reordered
        .get_column_names()
        .into_iter()
        .map(|name| name.as_str())
        .collect();
    assert_eq!(names, vec!["b", "a"]);
    assert!(df.select(["b", "a"]).unwrap().equals(&reordered));
}

#[test]
fn read_missing_column_is_an_error() {
    let dir = tempdir().unwrap();
    let parquet = dir.path().join("testfile.parquet");
    write_parquet(&mut test_df(), &parquet).unwrap();

    let result = read_parquet_columns(&parquet, &["a", "hashed_id"]);

    assert!(matches!(
        result,
        Err(ConvertError::ColumnNotFound { ref column, .. }) if column == "hashed_id"
    ));
}

#[test]
fn read_missing_file_is_an_error() {
    let dir = tempdir().unwrap();
    let result = read_parquet_columns(&dir.path().join("nope.parquet"), &["a"]);
    assert!(matches!(result, Err(ConvertError::FileNotFound { .. })));
}

#[test]
fn pseudonymized_frame_roundtrips() {
    let dir = tempdir().unwrap();
    let parquet = dir.path().join("hashed.parquet");
    let users = DataFrame::new(vec![
        Series::new("user".into(), vec![Some("Gorlins"), None, Some("vincega")]).into_column(),
        Series::new("score".into(), vec![10i64, 20, 30]).into_column(),
    ])
    .unwrap();

    let mut hashed = pseudonymize_column(&users, "user", &test_salt()).unwrap();
    write_parquet(&mut hashed, &parquet).unwrap();
    let ids = read_parquet_columns(&parquet, &["user"]).unwrap();

    let ids: Vec<Option<String>> = ids
        .column("user")
        .unwrap()
        .str()
        .unwrap()
        .iter()
        .map(|value| value.map(str::to_string))
        .collect();
    assert_eq!(
        ids,
        vec![
            Some(user_id("gorlins", &test_salt())),
            None,
            Some("5e09ef81".to_string()),
        ]
    );
}

#[test]
fn pseudonymize_rejects_numeric_columns() {
    let result = pseudonymize_column(&test_df(), "a", &test_salt());

    assert!(matches!(
        result,
        Err(ConvertError::Pseudonymize {
            source: HashError::TypeMismatch { .. },
            ..
        })
    ));
}
