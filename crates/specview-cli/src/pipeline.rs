//! Render pipeline: resolve, select, filter, group, pivot or flatten.

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, info_span};

use specview_config::{AmbiguousConfigWarning, ConfigSource, ConfigStore, ResolveError};
use specview_ingest::select_rows;
use specview_model::{
    CatalogTable, ColumnSpec, ColumnSpecParseError, ColumnType, PRODUCT_GROUP_HEADER,
};
use specview_transform::{
    AbortSignal, ColumnFilter, SpecFilter, TransformError, ViewTable, apply_filters,
    build_view_table, parse_logical,
};

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),
    #[error(transparent)]
    Transform(#[from] TransformError),
    #[error("invalid filter {arg:?}: {reason}")]
    Filter { arg: String, reason: String },
    #[error("invalid filter column: {0}")]
    FilterColumn(#[from] ColumnSpecParseError),
}

/// What to render.
#[derive(Debug, Clone)]
pub struct RenderRequest {
    pub category: String,
    pub series: Option<String>,
    /// Catalog column holding the configuration category, `Product Group` by default.
    pub group_header: String,
    pub filters: Vec<ColumnFilter>,
}

impl RenderRequest {
    pub fn new(category: impl Into<String>, series: Option<String>) -> Self {
        Self {
            category: category.into(),
            series,
            group_header: PRODUCT_GROUP_HEADER.to_string(),
            filters: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_group_header(mut self, header: impl Into<String>) -> Self {
        self.group_header = header.into();
        self
    }

    #[must_use]
    pub fn with_filters(mut self, filters: Vec<ColumnFilter>) -> Self {
        self.filters = filters;
        self
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RenderedView {
    pub category: String,
    pub series: Option<String>,
    pub source: ConfigSource,
    pub warnings: Vec<AmbiguousConfigWarning>,
    /// Rows of the category/series before filtering.
    pub selected_rows: usize,
    /// Rows left after filtering.
    pub matched_rows: usize,
    pub table: ViewTable,
}

pub fn render_view(
    store: &ConfigStore,
    request: &RenderRequest,
    catalog: &CatalogTable,
    abort: Option<&AbortSignal>,
) -> Result<RenderedView, PipelineError> {
    let span = info_span!(
        "render",
        category = %request.category,
        series = request.series.as_deref().unwrap_or("-")
    );
    let _guard = span.enter();

    let resolution = store.resolve(&request.category, request.series.as_deref())?;
    debug!(source = %resolution.source, "resolved view config");

    let selected = select_rows(
        catalog,
        &request.group_header,
        &request.category,
        request.series.as_deref(),
    );
    let matched = apply_filters(selected.iter().copied(), &request.filters);
    let table = build_view_table(matched.iter().copied(), resolution.config, abort)?;

    info!(
        selected = selected.len(),
        matched = matched.len(),
        groups = table.group_count(),
        pivot = table.is_pivot(),
        "rendered view"
    );
    Ok(RenderedView {
        category: request.category.clone(),
        series: request.series.clone(),
        source: resolution.source,
        warnings: resolution.warnings,
        selected_rows: selected.len(),
        matched_rows: matched.len(),
        table,
    })
}

/// Parses `"<column spec>=<value>"`.
///
/// - `LOV`: comma-separated options, any of which may match
/// - `number`, `range`: `min..max`
/// - `logical`: a truthy or falsy token
pub fn parse_filter(arg: &str) -> Result<ColumnFilter, PipelineError> {
    let invalid = |reason: &str| PipelineError::Filter {
        arg: arg.to_string(),
        reason: reason.to_string(),
    };
    let (column, value) = arg
        .rsplit_once('=')
        .ok_or_else(|| invalid("expected <column>=<value>"))?;
    let column = ColumnSpec::parse(column.trim())?;
    let value = value.trim();
    let filter = match column.column_type() {
        ColumnType::Lov => {
            let options: Vec<String> = value
                .split(',')
                .map(str::trim)
                .filter(|option| !option.is_empty())
                .map(str::to_string)
                .collect();
            if options.is_empty() {
                return Err(invalid("no options given"));
            }
            SpecFilter::LovAny { options }
        }
        ColumnType::Number => {
            let (min, max) = parse_bounds(value).ok_or_else(|| invalid("expected min..max"))?;
            SpecFilter::NumberBetween { min, max }
        }
        ColumnType::Range => {
            let (min, max) = parse_bounds(value).ok_or_else(|| invalid("expected min..max"))?;
            SpecFilter::RangeOverlaps { min, max }
        }
        ColumnType::Logical => SpecFilter::Logical {
            value: parse_logical(value).ok_or_else(|| invalid("expected yes or no"))?,
        },
        ColumnType::Text => return Err(invalid("text columns cannot be filtered")),
    };
    Ok(ColumnFilter::new(column, filter))
}

fn parse_bounds(value: &str) -> Option<(f64, f64)> {
    let (min, max) = value.split_once("..")?;
    let min: f64 = min.trim().parse().ok()?;
    let max: f64 = max.trim().parse().ok()?;
    Some(if min > max { (max, min) } else { (min, max) })
}
