#![deny(unsafe_code)]

use std::collections::BTreeMap;
use std::fmt::Write as _;

use crate::store::ConfigStore;

/// Data-quality findings for a loaded configuration.
#[derive(Debug, Clone, serde::Serialize)]
pub struct DoctorReport {
    pub schema: String,
    pub schema_version: u32,
    pub counts: DoctorCounts,
    pub categories: Vec<CategoryFindings>,
}

#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct DoctorCounts {
    pub categories: usize,
    pub with_default: usize,
    pub series_configs: usize,
    pub unusable: usize,
    pub duplicate_series: usize,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct CategoryFindings {
    pub category: String,
    /// No default config and no series configs.
    pub unusable: bool,
    /// Series configs that list no series at all.
    pub empty_series_entries: Vec<usize>,
    /// Series named by more than one entry.
    pub duplicate_series: Vec<DuplicateSeries>,
    /// Entries whose pivot column is also a group-by column.
    pub pivot_on_group_column: Vec<String>,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct DuplicateSeries {
    pub series: String,
    pub entries: Vec<usize>,
}

impl CategoryFindings {
    fn is_clean(&self) -> bool {
        !self.unusable
            && self.empty_series_entries.is_empty()
            && self.duplicate_series.is_empty()
            && self.pivot_on_group_column.is_empty()
    }
}

impl DoctorReport {
    pub fn from_store(store: &ConfigStore) -> Self {
        let mut counts = DoctorCounts {
            categories: store.len(),
            ..DoctorCounts::default()
        };
        let mut categories = Vec::new();
        for (name, config) in store.categories() {
            if config.default_config.is_some() {
                counts.with_default += 1;
            }
            counts.series_configs += config.series_configs.len();

            let mut by_series: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
            let mut empty_series_entries = Vec::new();
            for (idx, entry) in config.series_configs.iter().enumerate() {
                if entry.series.is_empty() {
                    empty_series_entries.push(idx);
                }
                for series in &entry.series {
                    let entries = by_series.entry(series.as_str()).or_default();
                    // A series listed twice inside one entry is not a conflict.
                    if entries.last() != Some(&idx) {
                        entries.push(idx);
                    }
                }
            }
            let duplicate_series: Vec<DuplicateSeries> = by_series
                .into_iter()
                .filter(|(_, entries)| entries.len() > 1)
                .map(|(series, entries)| DuplicateSeries {
                    series: series.to_string(),
                    entries,
                })
                .collect();

            let mut pivot_on_group_column = Vec::new();
            let views = config
                .default_config
                .iter()
                .map(|view| ("default_config".to_string(), view))
                .chain(
                    config
                        .series_configs
                        .iter()
                        .enumerate()
                        .map(|(idx, entry)| (format!("series_configs[{idx}]"), &entry.view)),
                );
            for (location, view) in views {
                if let Some(pivot_col) = view.pivot_col()
                    && view.group_by_cols.contains(pivot_col)
                {
                    pivot_on_group_column.push(location);
                }
            }

            let findings = CategoryFindings {
                category: name.to_string(),
                unusable: !config.is_usable(),
                empty_series_entries,
                duplicate_series,
                pivot_on_group_column,
            };
            if findings.unusable {
                counts.unusable += 1;
            }
            counts.duplicate_series += findings.duplicate_series.len();
            if !findings.is_clean() {
                categories.push(findings);
            }
        }
        Self {
            schema: "specview.config-doctor".to_string(),
            schema_version: 1,
            counts,
            categories,
        }
    }

    pub fn is_clean(&self) -> bool {
        self.categories.is_empty()
    }

    /// Plain text rendering, one finding per line.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        let c = &self.counts;
        let _ = writeln!(
            out,
            "categories: {} (with default: {}, unusable: {})",
            c.categories, c.with_default, c.unusable
        );
        let _ = writeln!(
            out,
            "series configs: {} (duplicate series: {})",
            c.series_configs, c.duplicate_series
        );
        for findings in &self.categories {
            let _ = writeln!(out, "[{}]", findings.category);
            if findings.unusable {
                let _ = writeln!(out, "  unusable: no default_config and no series_configs");
            }
            for idx in &findings.empty_series_entries {
                let _ = writeln!(out, "  series_configs[{idx}] lists no series");
            }
            for dup in &findings.duplicate_series {
                let entries: Vec<String> = dup.entries.iter().map(ToString::to_string).collect();
                let _ = writeln!(
                    out,
                    "  series {:?} declared by entries {}",
                    dup.series,
                    entries.join(", ")
                );
            }
            for location in &findings.pivot_on_group_column {
                let _ = writeln!(out, "  {location} pivots on one of its group-by columns");
            }
        }
        out
    }
}
