pub mod column;
pub mod error;
pub mod table;
pub mod view;

pub use column::{ColumnRef, ColumnSpec, ColumnType, SPEC_SEPARATOR};
pub use error::{ColumnSpecParseError, ModelError, Result};
pub use table::{
    CATEGORY_HEADER, CatalogTable, CellValue, NAME_HEADER, PRODUCT_GROUP_HEADER, Row,
    SERIES_HEADER,
};
pub use view::{CategoryConfig, PivotSpec, SeriesConfig, ViewConfig};
