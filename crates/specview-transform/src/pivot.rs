//! Pivot and flat (display column) views over grouped rows.

use std::collections::HashMap;

use serde::Serialize;
use tracing::debug;

use specview_model::{CellValue, ColumnRef, ColumnSpec, Row, ViewConfig};

use crate::cancel::AbortSignal;
use crate::error::{Result, TransformError};
use crate::group::RowGroup;
use crate::value::{KeyPart, key_part};

/// One populated pivot cell of a group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PivotCell {
    /// Column header, the first-seen text of this pivot value.
    pub pivot_value: String,
    pub value: CellValue,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PivotGroup {
    pub label: Vec<CellValue>,
    /// Cells in the order their pivot value first appeared in the group.
    pub cells: Vec<PivotCell>,
}

impl PivotGroup {
    pub fn get(&self, pivot_value: &str) -> Option<&CellValue> {
        self.cells
            .iter()
            .find(|cell| cell.pivot_value == pivot_value)
            .map(|cell| &cell.value)
    }

    pub fn pivot_values(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|cell| cell.pivot_value.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PivotTable {
    pub key_columns: Vec<ColumnSpec>,
    pub pivot_column: ColumnSpec,
    pub value_column: ColumnRef,
    /// Union of pivot headers over all groups, first-seen order.
    pub columns: Vec<String>,
    pub groups: Vec<PivotGroup>,
}

/// Pivot headers shared across groups; equal typed values share one header.
#[derive(Default)]
struct HeaderIndex {
    by_key: HashMap<KeyPart, usize>,
    headers: Vec<String>,
}

impl HeaderIndex {
    fn header_for(&mut self, key: KeyPart, raw: &str) -> &str {
        let slot = match self.by_key.get(&key) {
            Some(&slot) => slot,
            None => {
                self.by_key.insert(key, self.headers.len());
                self.headers.push(raw.to_string());
                self.headers.len() - 1
            }
        };
        &self.headers[slot]
    }
}

fn check_abort(abort: Option<&AbortSignal>, completed: usize, total: usize) -> Result<()> {
    match abort {
        Some(signal) if signal.is_aborted() => Err(TransformError::Aborted { completed, total }),
        _ => Ok(()),
    }
}

/// Expands each group into one cell per distinct pivot value.
///
/// Rows without a pivot value contribute no cell. Two rows with the same
/// pivot value collapse when their values agree and fail with
/// [`TransformError::PivotConflict`] when they do not.
pub fn pivot_groups(
    groups: &[RowGroup<'_>],
    config: &ViewConfig,
    abort: Option<&AbortSignal>,
) -> Result<Option<PivotTable>> {
    let Some(pivot) = config.pivot.as_ref() else {
        return Ok(None);
    };
    let pivot_header = pivot.column.header();
    let value_header = pivot.value.header();
    let pivot_type = pivot.column.column_type();

    let mut headers = HeaderIndex::default();
    let mut out = Vec::with_capacity(groups.len());
    for (completed, group) in groups.iter().enumerate() {
        check_abort(abort, completed, groups.len())?;

        let mut seen: HashMap<KeyPart, usize> = HashMap::new();
        let mut cells: Vec<PivotCell> = Vec::new();
        for row in &group.rows {
            let pivot_cell = row.get(&pivot_header);
            let Some(raw) = pivot_cell.as_text() else {
                debug!(group = %group.label_text(), "row without pivot value skipped");
                continue;
            };
            let key = key_part(pivot_type, pivot_cell);
            let value = row.get(&value_header);
            if let Some(&slot) = seen.get(&key) {
                let existing = &cells[slot];
                if existing.value != *value {
                    return Err(TransformError::PivotConflict {
                        group: group.label_text(),
                        pivot_value: existing.pivot_value.clone(),
                        first: existing.value.display().to_string(),
                        second: value.display().to_string(),
                    });
                }
                continue;
            }
            let header = headers.header_for(key.clone(), raw).to_string();
            seen.insert(key, cells.len());
            cells.push(PivotCell {
                pivot_value: header,
                value: value.clone(),
            });
        }
        out.push(PivotGroup {
            label: group.label.clone(),
            cells,
        });
    }

    debug!(
        groups = out.len(),
        columns = headers.headers.len(),
        "pivoted groups"
    );
    Ok(Some(PivotTable {
        key_columns: config.group_by_cols.clone(),
        pivot_column: pivot.column.clone(),
        value_column: pivot.value.clone(),
        columns: headers.headers,
        groups: out,
    }))
}

/// What a non-pivot group shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "values", rename_all = "snake_case")]
pub enum GroupSummary {
    /// Distinct display column values, first-seen order, missing cells skipped.
    Display(Vec<CellValue>),
    /// No display column: the group's rows stand for themselves.
    Rows(Vec<Row>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlatGroup {
    pub label: Vec<CellValue>,
    pub summary: GroupSummary,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlatTable {
    pub key_columns: Vec<ColumnSpec>,
    pub display_column: Option<ColumnRef>,
    pub groups: Vec<FlatGroup>,
}

/// One row per group, without expanding pivot columns.
pub fn flatten_groups(
    groups: &[RowGroup<'_>],
    config: &ViewConfig,
    abort: Option<&AbortSignal>,
) -> Result<FlatTable> {
    let display_header = config.display_col.as_ref().map(ColumnRef::header);
    let mut out = Vec::with_capacity(groups.len());
    for (completed, group) in groups.iter().enumerate() {
        check_abort(abort, completed, groups.len())?;
        let summary = match &display_header {
            Some(header) => {
                let mut values: Vec<CellValue> = Vec::new();
                for row in &group.rows {
                    let value = row.get(header);
                    if !value.is_missing() && !values.contains(value) {
                        values.push(value.clone());
                    }
                }
                GroupSummary::Display(values)
            }
            None => GroupSummary::Rows(group.rows.iter().map(|row| (*row).clone()).collect()),
        };
        out.push(FlatGroup {
            label: group.label.clone(),
            summary,
        });
    }
    Ok(FlatTable {
        key_columns: config.group_by_cols.clone(),
        display_column: config.display_col.clone(),
        groups: out,
    })
}
