//! Tests for pivot expansion and flat display views.

use specview_model::{CellValue, ColumnRef, ColumnSpec, Row, ViewConfig};
use specview_transform::{
    AbortSignal, GroupSummary, TransformError, ViewTable, build_view_table, flatten_groups,
    group_rows, pivot_groups,
};

fn spec(value: &str) -> ColumnSpec {
    ColumnSpec::parse(value).unwrap()
}

fn pivot_config(group_by: &[&str], pivot: &str, value: &str) -> ViewConfig {
    ViewConfig::new(
        group_by.iter().map(|c| spec(c)).collect(),
        None,
        true,
        Some(spec(pivot)),
        Some(ColumnRef::parse(value).unwrap()),
    )
    .unwrap()
}

fn flat_config(group_by: &[&str], display: Option<&str>) -> ViewConfig {
    ViewConfig::new(
        group_by.iter().map(|c| spec(c)).collect(),
        display.map(|d| ColumnRef::parse(d).unwrap()),
        false,
        None,
        None,
    )
    .unwrap()
}

fn row(name: &str, kind: &str, output: &str) -> Row {
    Row::from_pairs([("Name", name), ("Type ;LOV", kind), ("Output ;LOV", output)])
}

fn text(value: &str) -> CellValue {
    CellValue::Text(value.to_string())
}

#[test]
fn pivot_spreads_values_across_pivot_columns() {
    let rows = vec![
        row("X1", "A", "PNP"),
        row("X2", "A", "NPN"),
        row("X3", "B", "PNP"),
    ];
    let config = pivot_config(&["Type ;LOV"], "Output ;LOV", "Name");
    let groups = group_rows(&rows, &config);
    let table = pivot_groups(&groups, &config, None).unwrap().unwrap();

    assert_eq!(table.columns, vec!["PNP", "NPN"]);
    assert_eq!(table.groups.len(), 2);

    let a = &table.groups[0];
    assert_eq!(a.label, vec![text("A")]);
    assert_eq!(a.get("PNP"), Some(&text("X1")));
    assert_eq!(a.get("NPN"), Some(&text("X2")));

    let b = &table.groups[1];
    assert_eq!(b.label, vec![text("B")]);
    assert_eq!(b.get("PNP"), Some(&text("X3")));
    assert_eq!(b.get("NPN"), None);
}

#[test]
fn identical_pivot_values_collapse() {
    let rows = vec![row("X1", "A", "PNP"), row("X1", "A", "PNP")];
    let config = pivot_config(&["Type ;LOV"], "Output ;LOV", "Name");
    let groups = group_rows(&rows, &config);
    let table = pivot_groups(&groups, &config, None).unwrap().unwrap();

    assert_eq!(table.groups.len(), 1);
    assert_eq!(table.groups[0].cells.len(), 1);
    assert_eq!(table.groups[0].get("PNP"), Some(&text("X1")));
}

#[test]
fn differing_pivot_values_conflict() {
    let rows = vec![row("X1", "A", "PNP"), row("X9", "A", "PNP")];
    let config = pivot_config(&["Type ;LOV"], "Output ;LOV", "Name");
    let groups = group_rows(&rows, &config);
    let err = pivot_groups(&groups, &config, None).unwrap_err();

    assert_eq!(
        err,
        TransformError::PivotConflict {
            group: "A".to_string(),
            pivot_value: "PNP".to_string(),
            first: "X1".to_string(),
            second: "X9".to_string(),
        }
    );
    assert!(err.to_string().contains("pivot conflict in group [A]"));
}

#[test]
fn missing_value_against_present_value_conflicts() {
    let rows = vec![
        row("X1", "A", "PNP"),
        Row::from_pairs([("Type ;LOV", "A"), ("Output ;LOV", "PNP")]),
    ];
    let config = pivot_config(&["Type ;LOV"], "Output ;LOV", "Name");
    let groups = group_rows(&rows, &config);
    assert!(matches!(
        pivot_groups(&groups, &config, None),
        Err(TransformError::PivotConflict { .. })
    ));
}

#[test]
fn rows_without_pivot_value_add_no_cell() {
    let rows = vec![row("X1", "A", "PNP"), row("X2", "A", "")];
    let config = pivot_config(&["Type ;LOV"], "Output ;LOV", "Name");
    let groups = group_rows(&rows, &config);
    let table = pivot_groups(&groups, &config, None).unwrap().unwrap();

    assert_eq!(table.columns, vec!["PNP"]);
    assert_eq!(table.groups[0].pivot_values().collect::<Vec<_>>(), vec!["PNP"]);
}

#[test]
fn numeric_pivot_headers_merge_equal_values() {
    let rows = vec![
        Row::from_pairs([("Name", "S1"), ("Kind ;LOV", "K"), ("Voltage ;number", "24 V")]),
        Row::from_pairs([("Name", "S2"), ("Kind ;LOV", "L"), ("Voltage ;number", "24.0 V")]),
    ];
    let config = pivot_config(&["Kind ;LOV"], "Voltage ;number", "Name");
    let groups = group_rows(&rows, &config);
    let table = pivot_groups(&groups, &config, None).unwrap().unwrap();

    assert_eq!(table.columns, vec!["24 V"]);
    assert_eq!(table.groups[1].get("24 V"), Some(&text("S2")));
}

#[test]
fn close_decimal_pivot_values_stay_separate_columns() {
    let rows = vec![
        Row::from_pairs([("Name", "A1"), ("Kind ;LOV", "x"), ("Gain ;number", "0.1")]),
        Row::from_pairs([
            ("Name", "A2"),
            ("Kind ;LOV", "x"),
            ("Gain ;number", "0.10000000000000000001"),
        ]),
    ];
    let config = pivot_config(&["Kind ;LOV"], "Gain ;number", "Name");
    let groups = group_rows(&rows, &config);
    let table = pivot_groups(&groups, &config, None).unwrap().unwrap();

    assert_eq!(table.columns, vec!["0.1", "0.10000000000000000001"]);
    assert_eq!(table.groups[0].get("0.1"), Some(&text("A1")));
    assert_eq!(table.groups[0].get("0.10000000000000000001"), Some(&text("A2")));
}

#[test]
fn non_pivot_config_yields_no_pivot_table() {
    let rows = vec![row("X1", "A", "PNP")];
    let config = flat_config(&["Type ;LOV"], Some("Name"));
    let groups = group_rows(&rows, &config);
    assert_eq!(pivot_groups(&groups, &config, None), Ok(None));
}

#[test]
fn flat_view_lists_distinct_display_values() {
    let rows = vec![
        row("X1", "A", "PNP"),
        row("X2", "A", "NPN"),
        row("X1", "A", "NPN"),
        row("", "B", "PNP"),
    ];
    let config = flat_config(&["Type ;LOV"], Some("Name"));
    let groups = group_rows(&rows, &config);
    let table = flatten_groups(&groups, &config, None).unwrap();

    assert_eq!(table.groups.len(), 2);
    assert_eq!(
        table.groups[0].summary,
        GroupSummary::Display(vec![text("X1"), text("X2")])
    );
    assert_eq!(table.groups[1].summary, GroupSummary::Display(Vec::new()));
}

#[test]
fn flat_view_without_display_column_keeps_rows() {
    let rows = vec![row("X1", "A", "PNP"), row("X2", "A", "NPN")];
    let config = flat_config(&["Type ;LOV"], None);
    let groups = group_rows(&rows, &config);
    let table = flatten_groups(&groups, &config, None).unwrap();

    match &table.groups[0].summary {
        GroupSummary::Rows(kept) => assert_eq!(kept, &rows),
        other => panic!("expected rows, got {other:?}"),
    }
}

#[test]
fn abort_stops_before_next_group() {
    let rows = vec![row("X1", "A", "PNP"), row("X2", "B", "PNP")];
    let config = pivot_config(&["Type ;LOV"], "Output ;LOV", "Name");
    let abort = AbortSignal::new();
    let handle = abort.clone();
    handle.abort();

    let err = build_view_table(&rows, &config, Some(&abort)).unwrap_err();
    assert_eq!(
        err,
        TransformError::Aborted {
            completed: 0,
            total: 2
        }
    );
}

#[test]
fn unaborted_signal_does_not_interfere() {
    let rows = vec![row("X1", "A", "PNP")];
    let config = pivot_config(&["Type ;LOV"], "Output ;LOV", "Name");
    let abort = AbortSignal::new();
    let table = build_view_table(&rows, &config, Some(&abort)).unwrap();
    assert!(table.is_pivot());
    assert_eq!(table.group_count(), 1);
}

#[test]
fn pivot_grid_leaves_absent_cells_blank() {
    let rows = vec![
        row("X1", "A", "PNP"),
        row("X2", "A", "NPN"),
        row("X3", "B", "PNP"),
    ];
    let config = pivot_config(&["Type ;LOV"], "Output ;LOV", "Name");
    let grid = build_view_table(&rows, &config, None).unwrap().to_grid();

    assert_eq!(grid.headers, vec!["Type", "PNP", "NPN"]);
    assert_eq!(
        grid.rows,
        vec![vec!["A", "X1", "X2"], vec!["B", "X3", ""]]
    );
}

#[test]
fn flat_grid_joins_names() {
    let rows = vec![row("X1", "A", "PNP"), row("X2", "A", "NPN")];
    let grid = build_view_table(&rows, &flat_config(&["Type ;LOV"], None), None)
        .unwrap()
        .to_grid();

    assert_eq!(grid.headers, vec!["Type", "Name"]);
    assert_eq!(grid.rows, vec![vec!["A", "X1, X2"]]);
}

#[test]
fn view_table_serializes_with_shape_tag() {
    let rows = vec![row("X1", "A", "PNP")];
    let config = pivot_config(&["Type ;LOV"], "Output ;LOV", "Name");
    let table = build_view_table(&rows, &config, None).unwrap();
    let json = serde_json::to_value(&table).unwrap();

    assert_eq!(json["shape"], "pivot");
    assert_eq!(json["columns"], serde_json::json!(["PNP"]));
    assert!(matches!(table, ViewTable::Pivot(_)));
}
