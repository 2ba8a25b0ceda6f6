//! Partitioning of rows by their group-by column values.

use std::collections::HashMap;

use tracing::debug;

use specview_model::{CellValue, ColumnSpec, Row, ViewConfig};

use crate::value::{KeyPart, key_part};

/// Typed key of a group, one part per group-by column.
pub type GroupKey = Vec<KeyPart>;

/// Rows sharing one group key, in input order.
#[derive(Debug, Clone)]
pub struct RowGroup<'a> {
    pub key: GroupKey,
    /// Raw group-by values of the first row of the group.
    pub label: Vec<CellValue>,
    pub rows: Vec<&'a Row>,
}

impl RowGroup<'_> {
    /// Label text joined for messages and headers.
    pub fn label_text(&self) -> String {
        self.label
            .iter()
            .map(CellValue::display)
            .collect::<Vec<_>>()
            .join(" / ")
    }
}

pub fn group_key(row: &Row, columns: &[ColumnSpec]) -> GroupKey {
    columns
        .iter()
        .map(|column| key_part(column.column_type(), row.get(&column.header())))
        .collect()
}

/// Groups rows by the config's group-by columns.
///
/// Groups appear in the order their first row was seen and keep their rows in
/// input order. With no group-by columns every row lands in one group.
pub fn group_rows<'a, I>(rows: I, config: &ViewConfig) -> Vec<RowGroup<'a>>
where
    I: IntoIterator<Item = &'a Row>,
{
    let columns = &config.group_by_cols;
    let headers: Vec<String> = columns.iter().map(ColumnSpec::header).collect();
    let mut index: HashMap<GroupKey, usize> = HashMap::new();
    let mut groups: Vec<RowGroup<'a>> = Vec::new();
    let mut anomalies = 0usize;

    for row in rows {
        let key = group_key(row, columns);
        anomalies += key.iter().filter(|part| part.is_unparsed()).count();
        match index.get(&key) {
            Some(&slot) => groups[slot].rows.push(row),
            None => {
                index.insert(key.clone(), groups.len());
                groups.push(RowGroup {
                    key,
                    label: headers.iter().map(|h| row.get(h).clone()).collect(),
                    rows: vec![row],
                });
            }
        }
    }

    if anomalies > 0 {
        debug!(
            anomalies,
            "cells did not parse for their column type and were grouped by raw value"
        );
    }
    debug!(groups = groups.len(), "grouped rows");
    groups
}
