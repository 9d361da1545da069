//! # Contingency Table
//!
//! A weighted, deduplicating contingency table used as the statistical
//! substrate for decision-tree induction.
//!
//! ## Key Features
//!
//! - **Deduplicating rows**: identical feature tuples are stored once with a weight
//! - **Weighted statistics**: state counts and probabilities count raw observations
//! - **Partitioning**: `filter_by_state` produces independent sub-tables for recursion
//! - **Polars interop**: build tables from categorical DataFrames and export them back
//!
//! ## Example
//!
//! ```rust
//! use contingency_table::ContingencyTable;
//!
//! let mut table = ContingencyTable::with_columns(["A", "B"]).unwrap();
//! table.add_row(&[1, 1]).unwrap();
//! table.add_row(&[2, 2]).unwrap();
//! table.add_row(&[1, 1]).unwrap();
//!
//! assert_eq!(table.row_count(), 2);
//! assert_eq!(table.total_weight(), 3);
//! assert!((table.state_probability("A", 1) - 2.0 / 3.0).abs() < 1e-12);
//!
//! // Partition on the first column and drop it from the child table
//! let child = table.filter_by_state(0usize, 1).unwrap();
//! assert_eq!(child.feature_count(), 1);
//! assert_eq!(child.total_weight(), 2);
//! ```

// Module declarations
pub mod column;
pub mod conf;
pub mod dataframe;
pub mod error;
pub mod filter;
pub mod query;
pub mod snapshot;
pub mod table;

pub use column::{ColumnKey, FeatureColumn, State, Weight};
pub use conf::{ColumnRetention, DEFAULT_WEIGHT_COLUMN};
pub use error::{Result, TableError};
pub use query::LogicalRow;
pub use table::ContingencyTable;
