use thiserror::Error;

/// Errors raised by sorting, projection and view validation.
///
/// None of these are retried: sorting is deterministic, so a retry would
/// fail the same way.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SortError {
    /// Column kind outside the supported fixed-width / boolean set.
    #[error("unsupported column kind: {kind}")]
    InvalidKind { kind: String },

    /// A companion column does not have the key column's row count.
    #[error("column '{column}' has {actual} rows, expected {expected}")]
    LengthMismatch {
        column: String,
        expected: usize,
        actual: usize,
    },

    /// A permutation is not a bijection on `[0, n)`. Indicates an engine bug.
    #[error("corrupt permutation: {detail}")]
    CorruptPermutation { detail: String },

    #[error("column not found: {column}")]
    ColumnNotFound { column: String },

    #[error("row {row} out of range for {nrows} rows")]
    RowOutOfBounds { row: usize, nrows: usize },

    /// Row indices are `u32`; larger columns cannot be sorted.
    #[error("{rows} rows exceed the u32 row index space")]
    RowCountOverflow { rows: usize },

    /// Raw column bytes that do not decode under the declared kind.
    #[error("invalid raw column data: {detail}")]
    InvalidRawData { detail: String },

    /// A non-null input value equals the kind's null sentinel.
    #[error("column '{column}' row {row} holds the reserved null sentinel")]
    SentinelCollision { column: String, row: usize },

    #[error("invalid sort configuration: {detail}")]
    InvalidConfig { detail: String },
}

pub type Result<T> = std::result::Result<T, SortError>;
