use crate::table::Shape;
use thiserror::Error;

/// Errors that can occur during table operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    #[error("Unsupported accessor: {identifier}")]
    UnsupportedAccessor { identifier: String },

    #[error("{operation}: tables do not have matching headers or dimensions (left {left}, right {right})")]
    ShapeMismatch {
        operation: &'static str,
        left: Shape,
        right: Shape,
    },

    #[error("{operation}: headers do not match")]
    HeaderMismatch { operation: &'static str },

    #[error("Row index out of bounds: {index} (table has {count} rows)")]
    RowIndexOutOfBounds { index: usize, count: usize },
}

pub type Result<T> = std::result::Result<T, TableError>;
