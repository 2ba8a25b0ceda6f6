//! Polars DataFrame adapter.

use polars::prelude::*;

use specview_model::{CatalogTable, CellValue, Row};

use crate::error::Result;
use crate::reader::header_slots;

/// Converts a Polars AnyValue to catalog text.
///
/// Null becomes empty, floats keep their shortest exact form (`24`, `2.5`),
/// booleans render as `true`/`false` so logical columns parse them.
pub fn any_to_string(value: AnyValue<'_>) -> String {
    match value {
        AnyValue::Null => String::new(),
        AnyValue::Int8(v) => v.to_string(),
        AnyValue::Int16(v) => v.to_string(),
        AnyValue::Int32(v) => v.to_string(),
        AnyValue::Int64(v) => v.to_string(),
        AnyValue::UInt8(v) => v.to_string(),
        AnyValue::UInt16(v) => v.to_string(),
        AnyValue::UInt32(v) => v.to_string(),
        AnyValue::UInt64(v) => v.to_string(),
        AnyValue::Float32(v) => format!("{v}"),
        AnyValue::Float64(v) => format!("{v}"),
        AnyValue::String(s) => s.to_string(),
        AnyValue::StringOwned(s) => s.to_string(),
        AnyValue::Boolean(b) => b.to_string(),
        other => other.to_string(),
    }
}

/// Builds a catalog from a DataFrame, e.g. one read from a spreadsheet export.
pub fn catalog_from_dataframe(df: &DataFrame) -> Result<CatalogTable> {
    let names: Vec<String> = df
        .get_column_names()
        .into_iter()
        .map(ToString::to_string)
        .collect();
    let (columns, slots) = header_slots(names.iter().map(String::as_str), "dataframe");

    let mut sources = Vec::with_capacity(columns.len());
    for (name, slot) in names.iter().zip(&slots) {
        if let Some(slot) = slot {
            sources.push((*slot, df.column(name)?));
        }
    }

    let mut table = CatalogTable::new(columns);
    for row_idx in 0..df.height() {
        let mut row = Row::new();
        for (slot, column) in &sources {
            let value = any_to_string(column.get(row_idx)?);
            row.set(table.columns[*slot].clone(), CellValue::from_raw(&value));
        }
        table.push_row(row);
    }
    tracing::info!(
        rows = table.len(),
        columns = table.columns.len(),
        "Loaded catalog from DataFrame"
    );
    Ok(table)
}
