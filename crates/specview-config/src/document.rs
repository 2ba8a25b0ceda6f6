//! Serde shape of the spec view configuration document.
//!
//! The document is a JSON object keyed by category name:
//!
//! ```json
//! {
//!     "Photoelectric Sensors": {
//!         "default_config": { "group_by_cols": ["Sensing method ;LOV"], "display_col": null,
//!                             "pivot_required": false, "pivot_col": null, "pivot_value_col": null },
//!         "series_configs": [
//!             { "series": ["E3Z"], "group_by_cols": ["Sensing method ;LOV"], "display_col": null,
//!               "pivot_required": true, "pivot_col": "Output type ;LOV", "pivot_value_col": "Name" }
//!         ]
//!     }
//! }
//! ```
//!
//! Column specs stay plain strings here; [`ViewDoc::to_view`] parses them with
//! enough context to point at the offending entry.

#![deny(unsafe_code)]

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use specview_model::{CategoryConfig, ColumnRef, ColumnSpec, SeriesConfig, ViewConfig};

use crate::error::ConfigError;

/// Categories are kept in name order, so a written document lists them sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfigDocument {
    pub categories: BTreeMap<String, CategoryDoc>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryDoc {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_config: Option<ViewDoc>,
    #[serde(default)]
    pub series_configs: Vec<SeriesDoc>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewDoc {
    #[serde(default)]
    pub group_by_cols: Vec<String>,
    pub display_col: Option<String>,
    #[serde(default)]
    pub pivot_required: bool,
    pub pivot_col: Option<String>,
    pub pivot_value_col: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesDoc {
    #[serde(default)]
    pub series: Vec<String>,
    #[serde(flatten)]
    pub view: ViewDoc,
}

impl ConfigDocument {
    pub fn from_json_str(json: &str, origin: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|source| ConfigError::Json {
            origin: origin.to_string(),
            source,
        })
    }

    /// Serializes with four-space indentation, `null` for absent columns.
    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        let mut out = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
        self.serialize(&mut serializer)
            .map_err(|source| ConfigError::Json {
                origin: "<serialize>".to_string(),
                source,
            })?;
        Ok(String::from_utf8_lossy(&out).into_owned())
    }
}

impl CategoryDoc {
    pub fn to_category(&self, category: &str) -> Result<CategoryConfig, ConfigError> {
        let default_config = self
            .default_config
            .as_ref()
            .map(|view| view.to_view(category, "default_config"))
            .transpose()?;
        let series_configs = self
            .series_configs
            .iter()
            .enumerate()
            .map(|(idx, entry)| entry.to_series(category, idx))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(CategoryConfig {
            default_config,
            series_configs,
        })
    }

    pub fn from_category(config: &CategoryConfig) -> Self {
        Self {
            default_config: config.default_config.as_ref().map(ViewDoc::from_view),
            series_configs: config
                .series_configs
                .iter()
                .map(SeriesDoc::from_series)
                .collect(),
        }
    }
}

impl SeriesDoc {
    pub fn to_series(&self, category: &str, index: usize) -> Result<SeriesConfig, ConfigError> {
        let location = format!("series_configs[{index}]");
        Ok(SeriesConfig {
            series: self.series.clone(),
            view: self.view.to_view(category, &location)?,
        })
    }

    pub fn from_series(config: &SeriesConfig) -> Self {
        Self {
            series: config.series.clone(),
            view: ViewDoc::from_view(&config.view),
        }
    }
}

impl ViewDoc {
    pub fn to_view(&self, category: &str, location: &str) -> Result<ViewConfig, ConfigError> {
        let spec_error = |field: &'static str| {
            let category = category.to_string();
            let location = location.to_string();
            move |source| ConfigError::ColumnSpec {
                category,
                location,
                field,
                source,
            }
        };
        let group_by_cols = self
            .group_by_cols
            .iter()
            .map(|raw| ColumnSpec::parse(raw))
            .collect::<Result<Vec<_>, _>>()
            .map_err(spec_error("group_by_cols"))?;
        let display_col = ColumnRef::parse_optional(self.display_col.as_deref())
            .map_err(spec_error("display_col"))?;
        let pivot_col = ColumnSpec::parse_optional(self.pivot_col.as_deref())
            .map_err(spec_error("pivot_col"))?;
        let pivot_value_col = ColumnRef::parse_optional(self.pivot_value_col.as_deref())
            .map_err(spec_error("pivot_value_col"))?;
        ViewConfig::new(
            group_by_cols,
            display_col,
            self.pivot_required,
            pivot_col,
            pivot_value_col,
        )
        .map_err(|err| ConfigError::InvalidView {
            category: category.to_string(),
            location: location.to_string(),
            message: err.to_string(),
        })
    }

    pub fn from_view(view: &ViewConfig) -> Self {
        Self {
            group_by_cols: view.group_by_cols.iter().map(ToString::to_string).collect(),
            display_col: view.display_col.as_ref().map(ToString::to_string),
            pivot_required: view.pivot_required(),
            pivot_col: view.pivot_col().map(ToString::to_string),
            pivot_value_col: view.pivot_value_col().map(ToString::to_string),
        }
    }
}
