//! Spec column discovery and category/series row selection.
//!
//! Configuration categories are matched against one catalog column, the
//! group header. Product data exports key their configs by `Product Group`.

use specview_model::{CatalogTable, ColumnSpec, Row, SERIES_HEADER, SPEC_SEPARATOR};

/// Headers that parse as column specs and hold at least one value, sorted by header.
pub fn spec_columns(table: &CatalogTable) -> Vec<ColumnSpec> {
    let mut specs: Vec<ColumnSpec> = table
        .columns
        .iter()
        .filter(|header| header.contains(SPEC_SEPARATOR))
        .filter_map(|header| match ColumnSpec::parse(header) {
            Ok(spec) => Some(spec),
            Err(error) => {
                tracing::warn!(%error, "column header looks like a spec but does not parse");
                None
            }
        })
        .filter(|spec| {
            let header = spec.header();
            table.rows.iter().any(|row| !row.get(&header).is_missing())
        })
        .collect();
    specs.sort_by_key(ColumnSpec::header);
    specs
}

/// Rows whose `group_header` cell equals `category`, optionally narrowed to
/// one series, in table order.
pub fn select_rows<'a>(
    table: &'a CatalogTable,
    group_header: &str,
    category: &str,
    series: Option<&str>,
) -> Vec<&'a Row> {
    table
        .rows
        .iter()
        .filter(|row| row.text(group_header) == Some(category))
        .filter(|row| series.is_none_or(|series| row.text(SERIES_HEADER) == Some(series)))
        .collect()
}

/// Distinct values of `group_header` in first-seen order.
pub fn categories<'a>(table: &'a CatalogTable, group_header: &str) -> Vec<&'a str> {
    distinct(table.rows.iter().filter_map(|row| row.text(group_header)))
}

/// Distinct series of one category in first-seen order.
pub fn series_of<'a>(table: &'a CatalogTable, group_header: &str, category: &str) -> Vec<&'a str> {
    distinct(
        select_rows(table, group_header, category, None)
            .into_iter()
            .filter_map(|row| row.text(SERIES_HEADER)),
    )
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let mut out: Vec<&str> = Vec::new();
    for value in values {
        if !out.contains(&value) {
            out.push(value);
        }
    }
    out
}
