//! Serialized form of a table. Deserializing validates the snapshot and
//! re-establishes the deduplication invariant.

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::column::{FeatureColumn, Weight};
use crate::error::TableError;
use crate::table::ContingencyTable;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSnapshot {
    pub weight_column: String,
    pub columns: Vec<FeatureColumn>,
    pub weights: Vec<Weight>,
}

impl From<ContingencyTable> for TableSnapshot {
    fn from(table: ContingencyTable) -> Self {
        Self {
            weight_column: table.weight_column,
            columns: table.features,
            weights: table.weights,
        }
    }
}

impl TryFrom<TableSnapshot> for ContingencyTable {
    type Error = TableError;

    fn try_from(snapshot: TableSnapshot) -> Result<Self, Self::Error> {
        let names = snapshot
            .columns
            .iter()
            .map(|c| c.name.as_str())
            .chain(std::iter::once(snapshot.weight_column.as_str()));
        if let Some(name) = names.duplicates().next() {
            return Err(TableError::InvalidSnapshot(format!(
                "column '{}' appears more than once",
                name
            )));
        }

        let row_count = snapshot.weights.len();
        if let Some(column) = snapshot.columns.iter().find(|c| c.len() != row_count) {
            return Err(TableError::InvalidSnapshot(format!(
                "column '{}' has {} values, expected {}",
                column.name,
                column.len(),
                row_count
            )));
        }
        if let Some(row) = snapshot.weights.iter().position(|&w| w == 0) {
            return Err(TableError::InvalidSnapshot(format!(
                "row {} has zero weight",
                row
            )));
        }

        let total_weight = snapshot
            .weights
            .iter()
            .try_fold(0 as Weight, |acc, &w| acc.checked_add(w))
            .ok_or_else(|| TableError::InvalidSnapshot("total weight overflows".to_string()))?;

        let mut table = ContingencyTable {
            features: snapshot.columns,
            weight_column: snapshot.weight_column,
            weights: snapshot.weights,
            total_weight,
        };
        table.compact();
        Ok(table)
    }
}
