use thiserror::Error;

use crate::column::State;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    #[error("column '{name}' already exists")]
    DuplicateColumn { name: String },
    #[error("column {column} not found")]
    ColumnNotFound { column: String },
    #[error("row has {actual} values but the table has {expected} feature columns")]
    RowArityMismatch { expected: usize, actual: usize },
    #[error("row index {index} out of range for {row_count} rows")]
    RowIndexOutOfRange { index: usize, row_count: usize },
    #[error("state {state} does not occur in column '{column}'")]
    StateNotPresent { column: String, state: State },
    #[error("cannot add column '{name}' to a table that already holds rows")]
    RowsAlreadyPresent { name: String },
    #[error("row weight must be at least 1")]
    ZeroWeight,
    #[error("total weight would exceed u64::MAX")]
    WeightOverflow,
    #[error("invalid table snapshot: {0}")]
    InvalidSnapshot(String),
    #[error("dataframe conversion failed: {0}")]
    DataFrame(String),
}

pub type Result<T> = std::result::Result<T, TableError>;
