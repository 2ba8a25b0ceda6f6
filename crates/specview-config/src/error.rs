#![deny(unsafe_code)]

use std::path::PathBuf;

use specview_model::ColumnSpecParseError;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config JSON {origin}: {source}")]
    Json {
        origin: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("category {category:?}, {location}.{field}: {source}")]
    ColumnSpec {
        category: String,
        location: String,
        field: &'static str,
        #[source]
        source: ColumnSpecParseError,
    },

    #[error("category {category:?}, {location}: {message}")]
    InvalidView {
        category: String,
        location: String,
        message: String,
    },
}

impl ConfigError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Resolution failures. Both are fatal for the request that triggered them.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    #[error("category {category:?} is not configured")]
    CategoryNotFound { category: String },

    #[error("no view config for category {category:?}{}", series_suffix(.series))]
    ConfigNotFound {
        category: String,
        series: Option<String>,
    },
}

fn series_suffix(series: &Option<String>) -> String {
    series
        .as_ref()
        .map(|name| format!(" and series {name:?}"))
        .unwrap_or_default()
}

/// Failures of copy-on-write document edits.
#[derive(Debug, thiserror::Error)]
pub enum EditError {
    #[error("category {category:?} does not exist in the document")]
    UnknownCategory { category: String },

    #[error("category {category:?} has {len} series configs, index {index} is out of range")]
    IndexOutOfRange {
        category: String,
        index: usize,
        len: usize,
    },

    #[error("a series config for category {category:?} must list at least one series")]
    EmptySeries { category: String },

    /// The entry does not describe a valid view.
    #[error(transparent)]
    Invalid(#[from] ConfigError),
}
