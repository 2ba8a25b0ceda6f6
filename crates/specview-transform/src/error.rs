use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransformError {
    /// Two rows of one group disagree on the value of the same pivot cell.
    #[error(
        "pivot conflict in group [{group}]: column {pivot_value:?} has both {first:?} and {second:?}"
    )]
    PivotConflict {
        group: String,
        pivot_value: String,
        first: String,
        second: String,
    },
    #[error("transformation aborted after {completed} of {total} groups")]
    Aborted { completed: usize, total: usize },
}

pub type Result<T> = std::result::Result<T, TransformError>;
