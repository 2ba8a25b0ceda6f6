//! Selection of the single view config that applies to a category/series.

#![deny(unsafe_code)]

use std::fmt;

use serde::Serialize;
use tracing::warn;

use specview_model::ViewConfig;

use crate::error::ResolveError;
use crate::store::ConfigStore;

/// Where a resolved config came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ConfigSource {
    Default,
    Series { index: usize },
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigSource::Default => f.write_str("default_config"),
            ConfigSource::Series { index } => write!(f, "series_configs[{index}]"),
        }
    }
}

/// Several series configs list the requested series. The first one was used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AmbiguousConfigWarning {
    pub category: String,
    pub series: String,
    pub matches: usize,
    /// Indices of every matching entry, in declared order.
    pub indices: Vec<usize>,
}

impl fmt::Display for AmbiguousConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "series {:?} of category {:?} matches {} series configs {:?}; using the first",
            self.series, self.category, self.matches, self.indices
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Resolution<'a> {
    pub config: &'a ViewConfig,
    pub source: ConfigSource,
    pub warnings: Vec<AmbiguousConfigWarning>,
}

/// Resolves the view config for `category`, preferring the first series config
/// that lists `series` and falling back to the category default.
pub fn resolve<'a>(
    store: &'a ConfigStore,
    category: &str,
    series: Option<&str>,
) -> Result<Resolution<'a>, ResolveError> {
    let config = store
        .category(category)
        .ok_or_else(|| ResolveError::CategoryNotFound {
            category: category.to_string(),
        })?;

    let mut warnings = Vec::new();
    if let Some(series) = series {
        let indices = config.matching_series_configs(series);
        if let Some(&first) = indices.first() {
            if indices.len() > 1 {
                let warning = AmbiguousConfigWarning {
                    category: category.to_string(),
                    series: series.to_string(),
                    matches: indices.len(),
                    indices,
                };
                warn!(
                    category,
                    series,
                    matches = warning.matches,
                    "ambiguous series config, using first match"
                );
                warnings.push(warning);
            }
            return Ok(Resolution {
                config: &config.series_configs[first].view,
                source: ConfigSource::Series { index: first },
                warnings,
            });
        }
    }

    match &config.default_config {
        Some(default) => Ok(Resolution {
            config: default,
            source: ConfigSource::Default,
            warnings,
        }),
        None => Err(ResolveError::ConfigNotFound {
            category: category.to_string(),
            series: series.map(str::to_string),
        }),
    }
}

impl ConfigStore {
    pub fn resolve(
        &self,
        category: &str,
        series: Option<&str>,
    ) -> Result<Resolution<'_>, ResolveError> {
        resolve(self, category, series)
    }
}
