//! Error types for building and editing filter criteria.

use crate::catalog::ColumnType;
use crate::filter::Operator;
use thiserror::Error;

/// Errors surfaced to the host while building or editing criteria.
///
/// All of these are recoverable: the session stays usable and the caller
/// only needs to correct the call (refresh an index, pick a known column).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FilterError {
    #[error("Unknown column: {key}")]
    UnknownColumn { key: String },

    #[error("Duplicate column key: {key}")]
    DuplicateColumn { key: String },

    #[error("Operator '{operator}' is not valid for {column_type} columns")]
    InvalidOperator {
        operator: Operator,
        column_type: ColumnType,
    },

    #[error("Column '{key}' is {column_type} but the criterion declares {declared}")]
    ColumnTypeMismatch {
        key: String,
        column_type: ColumnType,
        declared: ColumnType,
    },

    #[error("Unknown operator: {0}")]
    UnknownOperator(String),

    #[error("Index {index} out of range for {len} criteria")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("No criterion is being drafted")]
    NoActiveDraft,

    #[error("Draft is incomplete: missing {missing}")]
    IncompleteDraft { missing: &'static str },

    #[error("Invalid value for {column_type} '{operator}': {reason}")]
    ValueShape {
        column_type: ColumnType,
        operator: Operator,
        reason: String,
    },
}

/// Result type for filter operations.
pub type FilterResult<T> = Result<T, FilterError>;
