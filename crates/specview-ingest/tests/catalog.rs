//! Tests for catalog loading and row selection.

use std::fs;
use std::path::Path;

use polars::prelude::*;
use specview_ingest::{
    IngestError, catalog_from_dataframe, categories, read_catalog, read_catalog_csv, select_rows,
    series_of, spec_columns,
};
use specview_model::{CATEGORY_HEADER, CellValue, PRODUCT_GROUP_HEADER};
use tempfile::TempDir;

const CATALOG: &str = "\u{feff}Category,Series,Name,Output type ;LOV,Sensing distance ;number,Housing ;LOV,Notes ;bogus
Photoelectric Sensors,E3Z,E3Z-D61,NPN,100 mm,,
Photoelectric Sensors,E3Z,E3Z-D62,PNP,100 mm,,
,,,,,,
Photoelectric Sensors,E3AS,E3AS-F1,PNP,1500 mm,,x
Proximity Sensors,E2E NEXT,E2E-X3D1,NPN,
";

fn write_catalog(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("catalog.csv");
    fs::write(&path, CATALOG).expect("write catalog");
    path
}

#[test]
fn reads_catalog_and_skips_blank_records() {
    let dir = TempDir::new().unwrap();
    let table = read_catalog_csv(&write_catalog(&dir)).expect("read catalog");

    assert_eq!(table.columns[0], "Category");
    assert_eq!(table.len(), 4);
    let short = &table.rows[3];
    assert_eq!(short.text("Name"), Some("E2E-X3D1"));
    assert_eq!(short.get("Sensing distance ;number"), &CellValue::Missing);
}

#[test]
fn missing_file_is_reported() {
    let err = read_catalog_csv(Path::new("/definitely/not/here.csv")).unwrap_err();
    assert!(matches!(err, IngestError::FileNotFound { .. }));
}

#[test]
fn spec_columns_need_values_and_valid_types() {
    let table = read_catalog(CATALOG.as_bytes(), Path::new("inline.csv")).unwrap();
    let headers: Vec<String> = spec_columns(&table).iter().map(|c| c.header()).collect();
    assert_eq!(headers, vec!["Output type ;LOV", "Sensing distance ;number"]);
}

#[test]
fn selects_rows_by_category_and_series() {
    let table = read_catalog(CATALOG.as_bytes(), Path::new("inline.csv")).unwrap();

    let all = select_rows(&table, CATEGORY_HEADER, "Photoelectric Sensors", None);
    assert_eq!(all.len(), 3);
    let e3z = select_rows(&table, CATEGORY_HEADER, "Photoelectric Sensors", Some("E3Z"));
    let names: Vec<&str> = e3z.iter().filter_map(|row| row.text("Name")).collect();
    assert_eq!(names, vec!["E3Z-D61", "E3Z-D62"]);
    assert!(select_rows(&table, CATEGORY_HEADER, "Safety Relays", None).is_empty());

    assert_eq!(
        categories(&table, CATEGORY_HEADER),
        vec!["Photoelectric Sensors", "Proximity Sensors"]
    );
    assert_eq!(
        series_of(&table, CATEGORY_HEADER, "Photoelectric Sensors"),
        vec!["E3Z", "E3AS"]
    );
}

#[test]
fn selects_rows_by_product_group() {
    let csv = "Product Group,Category,Series,Name
Sensors,Photoelectric Sensors,E3Z,E3Z-D61
Sensors,Proximity Sensors,E2E NEXT,E2E-X3D1
Safety,Safety Relays,G9SE,G9SE-201
";
    let table = read_catalog(csv.as_bytes(), Path::new("inline.csv")).unwrap();

    let names: Vec<&str> = select_rows(&table, PRODUCT_GROUP_HEADER, "Sensors", None)
        .iter()
        .filter_map(|row| row.text("Name"))
        .collect();
    assert_eq!(names, vec!["E3Z-D61", "E2E-X3D1"]);
    assert!(select_rows(&table, PRODUCT_GROUP_HEADER, "Photoelectric Sensors", None).is_empty());
    assert_eq!(categories(&table, PRODUCT_GROUP_HEADER), vec!["Sensors", "Safety"]);
    assert_eq!(
        series_of(&table, PRODUCT_GROUP_HEADER, "Sensors"),
        vec!["E3Z", "E2E NEXT"]
    );
}

#[test]
fn reads_catalog_from_dataframe() {
    let df = df! {
        "Category" => &["Photoelectric Sensors", "Photoelectric Sensors"],
        "Name" => &["E3Z-D61", "E3Z-D62"],
        "Sensing distance ;number" => &[Some(100.0), None],
        "IO-Link ;logical" => &[true, false],
    }
    .unwrap();
    let table = catalog_from_dataframe(&df).unwrap();

    assert_eq!(table.len(), 2);
    assert_eq!(table.rows[0].text("Sensing distance ;number"), Some("100"));
    assert!(table.rows[1].get("Sensing distance ;number").is_missing());
    assert_eq!(table.rows[1].text("IO-Link ;logical"), Some("false"));
}
