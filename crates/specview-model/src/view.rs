#![deny(unsafe_code)]

use serde::{Deserialize, Serialize};

use crate::{ColumnRef, ColumnSpec, ModelError};

/// Pivot column and the column that fills the pivoted cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PivotSpec {
    pub column: ColumnSpec,
    pub value: ColumnRef,
}

/// How one comparison table is shaped.
///
/// `pivot_col` and `pivot_value_col` only exist together, so the pivot pair is
/// held as a single optional value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewConfig {
    pub group_by_cols: Vec<ColumnSpec>,
    pub display_col: Option<ColumnRef>,
    pub pivot: Option<PivotSpec>,
}

impl ViewConfig {
    /// Builds a config from the flat document fields, enforcing that the pivot
    /// columns are present exactly when a pivot is required.
    pub fn new(
        group_by_cols: Vec<ColumnSpec>,
        display_col: Option<ColumnRef>,
        pivot_required: bool,
        pivot_col: Option<ColumnSpec>,
        pivot_value_col: Option<ColumnRef>,
    ) -> Result<Self, ModelError> {
        let pivot = match (pivot_required, pivot_col, pivot_value_col) {
            (true, Some(column), Some(value)) => Some(PivotSpec { column, value }),
            (true, None, _) => {
                return Err(ModelError::InvalidView(
                    "pivot_required is true but pivot_col is null".to_string(),
                ));
            }
            (true, Some(_), None) => {
                return Err(ModelError::InvalidView(
                    "pivot_required is true but pivot_value_col is null".to_string(),
                ));
            }
            (false, None, None) => None,
            (false, _, _) => {
                return Err(ModelError::InvalidView(
                    "pivot_col and pivot_value_col must be null when pivot_required is false"
                        .to_string(),
                ));
            }
        };
        Ok(Self {
            group_by_cols,
            display_col,
            pivot,
        })
    }

    pub fn pivot_required(&self) -> bool {
        self.pivot.is_some()
    }

    pub fn pivot_col(&self) -> Option<&ColumnSpec> {
        self.pivot.as_ref().map(|pivot| &pivot.column)
    }

    pub fn pivot_value_col(&self) -> Option<&ColumnRef> {
        self.pivot.as_ref().map(|pivot| &pivot.value)
    }
}

/// A view config that applies to a named set of product series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesConfig {
    pub series: Vec<String>,
    pub view: ViewConfig,
}

impl SeriesConfig {
    /// Exact string membership.
    pub fn applies_to(&self, series: &str) -> bool {
        self.series.iter().any(|name| name == series)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryConfig {
    pub default_config: Option<ViewConfig>,
    pub series_configs: Vec<SeriesConfig>,
}

impl CategoryConfig {
    /// A category needs a default or at least one series config to resolve anything.
    pub fn is_usable(&self) -> bool {
        self.default_config.is_some() || !self.series_configs.is_empty()
    }

    /// Indices of series configs listing `series`, in declared order.
    pub fn matching_series_configs(&self, series: &str) -> Vec<usize> {
        self.series_configs
            .iter()
            .enumerate()
            .filter(|(_, config)| config.applies_to(series))
            .map(|(idx, _)| idx)
            .collect()
    }
}
