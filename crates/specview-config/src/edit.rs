//! Copy-on-write edits of a configuration document.
//!
//! Each operation returns a new document; the source document (and any store
//! built from it) is never touched. Entries are checked against the model
//! before they are accepted, so an edited document always loads. Publish the result through
//! [`crate::ConfigHandle::publish`] once it has been written and reloaded.

#![deny(unsafe_code)]

use crate::document::{CategoryDoc, ConfigDocument, SeriesDoc, ViewDoc};
use crate::error::EditError;

impl ConfigDocument {
    /// Adds an empty category (`{"series_configs": []}`) if it is missing.
    #[must_use]
    pub fn with_category(&self, category: &str) -> Self {
        let mut next = self.clone();
        next.categories.entry(category.to_string()).or_default();
        next
    }

    /// Appends a series config, creating the category when needed.
    pub fn with_series_config(&self, category: &str, entry: SeriesDoc) -> Result<Self, EditError> {
        let mut next = self.with_category(category);
        let doc = next.category_mut(category)?;
        ensure_series(category, doc.series_configs.len(), &entry)?;
        doc.series_configs.push(entry);
        Ok(next)
    }

    pub fn with_replaced_series_config(
        &self,
        category: &str,
        index: usize,
        entry: SeriesDoc,
    ) -> Result<Self, EditError> {
        let mut next = self.clone();
        let doc = next.category_mut(category)?;
        let len = doc.series_configs.len();
        ensure_series(category, index, &entry)?;
        let slot = doc
            .series_configs
            .get_mut(index)
            .ok_or_else(|| EditError::IndexOutOfRange {
                category: category.to_string(),
                index,
                len,
            })?;
        *slot = entry;
        Ok(next)
    }

    pub fn without_series_config(&self, category: &str, index: usize) -> Result<Self, EditError> {
        let mut next = self.clone();
        let doc = next.category_mut(category)?;
        if index >= doc.series_configs.len() {
            return Err(EditError::IndexOutOfRange {
                category: category.to_string(),
                index,
                len: doc.series_configs.len(),
            });
        }
        doc.series_configs.remove(index);
        Ok(next)
    }

    /// Sets or clears the category default.
    pub fn with_default_config(
        &self,
        category: &str,
        view: Option<ViewDoc>,
    ) -> Result<Self, EditError> {
        if let Some(view) = &view {
            view.to_view(category, "default_config")?;
        }
        let mut next = self.clone();
        next.category_mut(category)?.default_config = view;
        Ok(next)
    }

    fn category_mut(&mut self, category: &str) -> Result<&mut CategoryDoc, EditError> {
        self.categories
            .get_mut(category)
            .ok_or_else(|| EditError::UnknownCategory {
                category: category.to_string(),
            })
    }
}

fn ensure_series(category: &str, index: usize, entry: &SeriesDoc) -> Result<(), EditError> {
    if entry.series.is_empty() {
        return Err(EditError::EmptySeries {
            category: category.to_string(),
        });
    }
    entry
        .view
        .to_view(category, &format!("series_configs[{index}]"))?;
    Ok(())
}
