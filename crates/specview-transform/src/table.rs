use serde::Serialize;

use specview_model::{CellValue, NAME_HEADER, Row, ViewConfig};

use crate::cancel::AbortSignal;
use crate::error::Result;
use crate::group::group_rows;
use crate::pivot::{FlatTable, GroupSummary, PivotTable, flatten_groups, pivot_groups};

/// Output of a view transformation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum ViewTable {
    Pivot(PivotTable),
    Flat(FlatTable),
}

/// Rectangular text rendering of a [`ViewTable`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Grid {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Groups `rows` and pivots or flattens them as `config` asks.
pub fn build_view_table<'a, I>(
    rows: I,
    config: &ViewConfig,
    abort: Option<&AbortSignal>,
) -> Result<ViewTable>
where
    I: IntoIterator<Item = &'a Row>,
{
    let groups = group_rows(rows, config);
    match pivot_groups(&groups, config, abort)? {
        Some(table) => Ok(ViewTable::Pivot(table)),
        None => flatten_groups(&groups, config, abort).map(ViewTable::Flat),
    }
}

fn label_cells(label: &[CellValue]) -> impl Iterator<Item = String> + '_ {
    label.iter().map(|cell| cell.display().to_string())
}

fn join_values<'a>(values: impl Iterator<Item = &'a str>) -> String {
    values.collect::<Vec<_>>().join(", ")
}

impl ViewTable {
    pub fn group_count(&self) -> usize {
        match self {
            ViewTable::Pivot(table) => table.groups.len(),
            ViewTable::Flat(table) => table.groups.len(),
        }
    }

    pub fn is_pivot(&self) -> bool {
        matches!(self, ViewTable::Pivot(_))
    }

    /// One grid row per group. Key columns use their display names.
    pub fn to_grid(&self) -> Grid {
        match self {
            ViewTable::Pivot(table) => {
                let mut headers: Vec<String> =
                    table.key_columns.iter().map(|c| c.name().to_string()).collect();
                headers.extend(table.columns.iter().cloned());
                let rows = table
                    .groups
                    .iter()
                    .map(|group| {
                        let mut row: Vec<String> = label_cells(&group.label).collect();
                        row.extend(table.columns.iter().map(|column| {
                            group
                                .get(column)
                                .map(|value| value.display().to_string())
                                .unwrap_or_default()
                        }));
                        row
                    })
                    .collect();
                Grid { headers, rows }
            }
            ViewTable::Flat(table) => {
                let mut headers: Vec<String> =
                    table.key_columns.iter().map(|c| c.name().to_string()).collect();
                headers.push(
                    table
                        .display_column
                        .as_ref()
                        .map_or(NAME_HEADER, |column| column.name())
                        .to_string(),
                );
                let rows = table
                    .groups
                    .iter()
                    .map(|group| {
                        let mut row: Vec<String> = label_cells(&group.label).collect();
                        row.push(match &group.summary {
                            GroupSummary::Display(values) => {
                                join_values(values.iter().map(CellValue::display))
                            }
                            GroupSummary::Rows(rows) => {
                                join_values(rows.iter().map(|r| r.get(NAME_HEADER).display()))
                            }
                        });
                        row
                    })
                    .collect();
                Grid { headers, rows }
            }
        }
    }
}
