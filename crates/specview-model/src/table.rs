#![deny(unsafe_code)]

use std::collections::BTreeMap;

/// Header of the product display name field.
pub const NAME_HEADER: &str = "Name";
pub const CATEGORY_HEADER: &str = "Category";
pub const SERIES_HEADER: &str = "Series";
pub const PRODUCT_GROUP_HEADER: &str = "Product Group";

static MISSING: CellValue = CellValue::Missing;

#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", content = "value")]
pub enum CellValue {
    Text(String),
    Missing,
}

impl CellValue {
    /// Blank text is stored as `Missing`.
    pub fn from_raw(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            CellValue::Missing
        } else {
            CellValue::Text(trimmed.to_string())
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(value) => Some(value),
            CellValue::Missing => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, CellValue::Missing)
    }

    /// Text for display; missing cells render as an empty string.
    pub fn display(&self) -> &str {
        self.as_text().unwrap_or("")
    }
}

/// One product row keyed by column header.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Row {
    pub cells: BTreeMap<String, CellValue>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a row from `(header, raw value)` pairs.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: AsRef<str>,
    {
        let cells = pairs
            .into_iter()
            .map(|(key, value)| (key.into(), CellValue::from_raw(value.as_ref())))
            .collect();
        Self { cells }
    }

    pub fn set(&mut self, header: impl Into<String>, value: CellValue) {
        self.cells.insert(header.into(), value);
    }

    /// Absent headers read as `Missing`.
    pub fn get(&self, header: &str) -> &CellValue {
        self.cells.get(header).unwrap_or(&MISSING)
    }

    pub fn text(&self, header: &str) -> Option<&str> {
        self.get(header).as_text()
    }
}

/// A materialized catalog: ordered headers plus rows.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct CatalogTable {
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
}

impl CatalogTable {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Row) {
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
