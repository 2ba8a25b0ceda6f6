use thiserror::Error;

/// A column descriptor that does not follow the `"<Name> ;<type>"` form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColumnSpecParseError {
    #[error("column spec {spec:?} is missing the \" ;\" separator")]
    MissingSeparator { spec: String },
    #[error("column spec {spec:?} has an empty name")]
    EmptyName { spec: String },
    #[error(
        "column spec {spec:?} has unknown type {found:?} (expected LOV, number, range, logical or text)"
    )]
    UnknownType { spec: String, found: String },
}

impl ColumnSpecParseError {
    /// The descriptor that failed to parse.
    pub fn spec(&self) -> &str {
        match self {
            Self::MissingSeparator { spec }
            | Self::EmptyName { spec }
            | Self::UnknownType { spec, .. } => spec,
        }
    }
}

#[derive(Debug, Error)]
pub enum ModelError {
    #[error(transparent)]
    ColumnSpec(#[from] ColumnSpecParseError),
    #[error("invalid view config: {0}")]
    InvalidView(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
