//! Spec filters and the facets that drive them.
//!
//! Facets summarise what a set of rows offers per spec column (LOV options,
//! number and range bounds); filters narrow the rows before grouping.

use std::collections::BTreeSet;

use serde::Serialize;

use specview_model::{ColumnSpec, ColumnType, Row};

use crate::value::{lov_values, parse_logical, parse_number, parse_range};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SpecFilter {
    /// Any of the options appears among the cell's `;`-separated values.
    LovAny { options: Vec<String> },
    /// Leading number lies in `[min, max]`.
    NumberBetween { min: f64, max: f64 },
    Logical { value: bool },
    /// Cell interval overlaps `[min, max]`.
    RangeOverlaps { min: f64, max: f64 },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnFilter {
    pub column: ColumnSpec,
    pub filter: SpecFilter,
}

impl ColumnFilter {
    pub fn new(column: ColumnSpec, filter: SpecFilter) -> Self {
        Self { column, filter }
    }

    /// Missing or unparseable cells never match.
    pub fn matches(&self, row: &Row) -> bool {
        let Some(raw) = row.text(&self.column.header()) else {
            return false;
        };
        match &self.filter {
            SpecFilter::LovAny { options } => {
                lov_values(raw).any(|value| options.iter().any(|option| option == value))
            }
            SpecFilter::NumberBetween { min, max } => {
                parse_number(raw).is_some_and(|n| *min <= n.value && n.value <= *max)
            }
            SpecFilter::Logical { value } => parse_logical(raw) == Some(*value),
            SpecFilter::RangeOverlaps { min, max } => {
                parse_range(raw).is_some_and(|range| range.overlaps(*min, *max))
            }
        }
    }
}

/// Rows matching every filter, in input order.
pub fn apply_filters<'a, I>(rows: I, filters: &[ColumnFilter]) -> Vec<&'a Row>
where
    I: IntoIterator<Item = &'a Row>,
{
    rows.into_iter()
        .filter(|row| filters.iter().all(|filter| filter.matches(row)))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Facet {
    Lov { options: Vec<String> },
    Number { min: f64, max: f64, unit: Option<String> },
    Range { min: f64, max: f64, unit: Option<String> },
    Logical,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnFacet {
    pub column: ColumnSpec,
    pub facet: Facet,
}

/// Facets for `columns` over `rows`. Columns without usable values are left out.
pub fn facets(rows: &[&Row], columns: &[ColumnSpec]) -> Vec<ColumnFacet> {
    columns
        .iter()
        .filter_map(|column| {
            let header = column.header();
            let raws: Vec<&str> = rows.iter().filter_map(|row| row.text(&header)).collect();
            if raws.is_empty() {
                return None;
            }
            let facet = match column.column_type() {
                ColumnType::Lov => {
                    let options: BTreeSet<&str> =
                        raws.iter().flat_map(|raw| lov_values(raw)).collect();
                    Facet::Lov {
                        options: options.into_iter().map(str::to_string).collect(),
                    }
                }
                ColumnType::Number => {
                    let numbers: Vec<_> = raws.iter().filter_map(|raw| parse_number(raw)).collect();
                    let (min, max) = bounds(numbers.iter().map(|n| (n.value, n.value)))?;
                    Facet::Number {
                        min,
                        max,
                        unit: numbers.into_iter().find_map(|n| n.unit),
                    }
                }
                ColumnType::Range => {
                    let ranges: Vec<_> = raws.iter().filter_map(|raw| parse_range(raw)).collect();
                    let (min, max) = bounds(ranges.iter().map(|r| (r.low, r.high)))?;
                    Facet::Range {
                        min,
                        max,
                        unit: ranges.into_iter().find_map(|r| r.unit),
                    }
                }
                ColumnType::Logical => Facet::Logical,
                ColumnType::Text => return None,
            };
            Some(ColumnFacet {
                column: column.clone(),
                facet,
            })
        })
        .collect()
}

fn bounds(values: impl Iterator<Item = (f64, f64)>) -> Option<(f64, f64)> {
    values.fold(None, |acc, (low, high)| match acc {
        None => Some((low, high)),
        Some((min, max)) => Some((f64::min(min, low), f64::max(max, high))),
    })
}
