//! Product catalog ingestion.
//!
//! Loads catalog exports into [`CatalogTable`](specview_model::CatalogTable)
//! rows and answers the questions a view needs before transformation:
//!
//! - **CSV Loading**: header normalization, blank records skipped
//! - **DataFrame Loading**: any Polars frame, cells rendered as text
//! - **Spec Columns**: which headers are typed `"Name ;type"` columns
//! - **Selection**: rows of one category, optionally one series

mod catalog;
mod error;
mod frame;
mod reader;

// === Error Types ===
pub use error::{IngestError, Result};

// === Loading ===
pub use frame::{any_to_string, catalog_from_dataframe};
pub use reader::{read_catalog, read_catalog_csv};

// === Selection ===
pub use catalog::{categories, select_rows, series_of, spec_columns};
