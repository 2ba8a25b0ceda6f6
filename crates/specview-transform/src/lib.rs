//! Comparison table transformation.
//!
//! - **value**: typed interpretation of LOV, number, range and logical cells
//! - **group**: first-seen, type-aware grouping by group-by columns
//! - **pivot**: pivot expansion with conflict detection, and flat display views
//! - **filter**: spec filters and facets
//! - **cancel**: abort flag checked between groups

pub mod cancel;
pub mod error;
pub mod filter;
pub mod group;
pub mod pivot;
pub mod table;
pub mod value;

pub use cancel::AbortSignal;
pub use error::{Result, TransformError};
pub use filter::{ColumnFacet, ColumnFilter, Facet, SpecFilter, apply_filters, facets};
pub use group::{GroupKey, RowGroup, group_key, group_rows};
pub use pivot::{
    FlatGroup, FlatTable, GroupSummary, PivotCell, PivotGroup, PivotTable, flatten_groups,
    pivot_groups,
};
pub use table::{Grid, ViewTable, build_view_table};
pub use value::{
    KeyPart, NumberValue, RangeValue, key_part, parse_logical, parse_number, parse_range,
};
