#![deny(unsafe_code)]

use std::collections::BTreeMap;
use std::path::Path;

use tracing::{debug, info};

use specview_model::CategoryConfig;

use crate::document::{CategoryDoc, ConfigDocument};
use crate::error::ConfigError;

/// Parsed category → configuration mapping. Immutable once built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigStore {
    categories: BTreeMap<String, CategoryConfig>,
}

impl ConfigStore {
    pub fn from_document(document: &ConfigDocument) -> Result<Self, ConfigError> {
        let mut categories = BTreeMap::new();
        for (name, doc) in &document.categories {
            let config = doc.to_category(name)?;
            debug!(
                category = %name,
                has_default = config.default_config.is_some(),
                series_configs = config.series_configs.len(),
                "parsed category"
            );
            categories.insert(name.clone(), config);
        }
        Ok(Self { categories })
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let document = ConfigDocument::from_json_str(json, "<inline>")?;
        Self::from_document(&document)
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let bytes = std::fs::read(path).map_err(|e| ConfigError::io(path, e))?;
        Self::from_slice(&bytes, &path.display().to_string())
    }

    pub(crate) fn from_slice(bytes: &[u8], origin: &str) -> Result<Self, ConfigError> {
        let document: ConfigDocument =
            serde_json::from_slice(bytes).map_err(|source| ConfigError::Json {
                origin: origin.to_string(),
                source,
            })?;
        let store = Self::from_document(&document)?;
        info!(
            origin,
            categories = store.len(),
            "loaded spec view config"
        );
        Ok(store)
    }

    /// Builds a store directly from parsed categories.
    pub fn from_categories(categories: BTreeMap<String, CategoryConfig>) -> Self {
        Self { categories }
    }

    pub fn category(&self, name: &str) -> Option<&CategoryConfig> {
        self.categories.get(name)
    }

    /// Categories in name order.
    pub fn categories(&self) -> impl Iterator<Item = (&str, &CategoryConfig)> + '_ {
        self.categories
            .iter()
            .map(|(name, config)| (name.as_str(), config))
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn to_document(&self) -> ConfigDocument {
        ConfigDocument {
            categories: self
                .categories
                .iter()
                .map(|(name, config)| (name.clone(), CategoryDoc::from_category(config)))
                .collect(),
        }
    }

    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        self.to_document().to_json_pretty()
    }
}
