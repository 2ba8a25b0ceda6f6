//! CSV catalog reading.

use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};

use specview_model::{CatalogTable, CellValue, Row};

use crate::error::{IngestError, Result};

/// Trims, strips a BOM and collapses inner whitespace runs to one space.
pub(crate) fn normalize_header(raw: &str) -> String {
    raw.trim()
        .trim_matches('\u{feff}')
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn normalize_cell(raw: &str) -> CellValue {
    CellValue::from_raw(raw.trim_matches('\u{feff}'))
}

fn is_blank(record: &StringRecord) -> bool {
    record.iter().all(|value| normalize_cell(value).is_missing())
}

/// Header slots that carry a usable name; blank and repeated headers are dropped.
pub(crate) fn header_slots<'a>(
    headers: impl IntoIterator<Item = &'a str>,
    origin: &str,
) -> (Vec<String>, Vec<Option<usize>>) {
    let mut columns: Vec<String> = Vec::new();
    let mut slots = Vec::new();
    for (index, raw) in headers.into_iter().enumerate() {
        let header = normalize_header(raw);
        if header.is_empty() {
            tracing::debug!(origin, index, "blank column header skipped");
            slots.push(None);
        } else if columns.contains(&header) {
            tracing::warn!(origin, index, header = %header, "duplicate column header skipped");
            slots.push(None);
        } else {
            slots.push(Some(columns.len()));
            columns.push(header);
        }
    }
    (columns, slots)
}

/// Reads a product catalog export.
///
/// The first non-blank record is the header row. Blank records are skipped,
/// short records are padded with missing cells.
pub fn read_catalog_csv(path: &Path) -> Result<CatalogTable> {
    let file = std::fs::File::open(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            IngestError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IngestError::FileRead {
                path: path.to_path_buf(),
                source: source.into(),
            }
        }
    })?;
    let table = read_catalog(file, path)?;
    tracing::info!(
        path = %path.display(),
        rows = table.len(),
        columns = table.columns.len(),
        "Loaded catalog"
    );
    Ok(table)
}

/// Reads a catalog from any reader; `path` is only used in errors.
pub fn read_catalog<R: Read>(input: R, path: &Path) -> Result<CatalogTable> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(input);

    let origin = path.display().to_string();
    let mut slots: Option<Vec<Option<usize>>> = None;
    let mut table = CatalogTable::default();
    for (record_index, record) in reader.records().enumerate() {
        let record = record.map_err(|source| IngestError::CsvParse {
            path: path.to_path_buf(),
            record: record_index + 1,
            source,
        })?;
        if is_blank(&record) {
            continue;
        }
        let Some(slots) = &slots else {
            let (columns, header_slots) = header_slots(record.iter(), &origin);
            table = CatalogTable::new(columns);
            slots = Some(header_slots);
            continue;
        };
        let mut row = Row::new();
        for (value, slot) in record.iter().zip(slots) {
            if let Some(slot) = slot {
                row.set(table.columns[*slot].clone(), normalize_cell(value));
            }
        }
        table.push_row(row);
    }
    Ok(table)
}
