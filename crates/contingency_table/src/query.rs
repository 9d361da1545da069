use std::collections::{BTreeMap, BTreeSet};

use itertools::Itertools;

use crate::column::{ColumnKey, FeatureColumn, State, Weight};
use crate::error::{Result, TableError};
use crate::table::ContingencyTable;

/// One logical row: its feature states in column order and its weight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogicalRow {
    pub states: Vec<State>,
    pub weight: Weight,
}

impl ContingencyTable {
    pub fn column<'a>(&self, column: impl Into<ColumnKey<'a>>) -> Result<&FeatureColumn> {
        let index = self.resolve(column.into())?;
        Ok(&self.features[index])
    }

    /// Name of the feature column at `index`. The weight column has no index.
    pub fn column_name(&self, index: usize) -> Result<&str> {
        self.column(index).map(|c| c.name.as_str())
    }

    /// Distinct states observed in a feature column.
    pub fn column_states<'a>(&self, column: impl Into<ColumnKey<'a>>) -> Result<BTreeSet<State>> {
        Ok(self.column(column)?.values.iter().copied().collect())
    }

    pub fn number_of_states<'a>(&self, column: impl Into<ColumnKey<'a>>) -> Result<usize> {
        Ok(self.column(column)?.values.iter().unique().count())
    }

    /// Raw observations whose value in `column` equals `state`.
    pub fn state_count<'a>(&self, column: impl Into<ColumnKey<'a>>, state: State) -> Result<Weight> {
        let column = self.column(column)?;
        Ok(column
            .values
            .iter()
            .zip(&self.weights)
            .filter(|(value, _)| **value == state)
            .map(|(_, weight)| *weight)
            .sum())
    }

    /// Weighted counts of every state of a column in a single scan.
    pub fn state_counts<'a>(
        &self,
        column: impl Into<ColumnKey<'a>>,
    ) -> Result<BTreeMap<State, Weight>> {
        let column = self.column(column)?;
        let mut counts: BTreeMap<State, Weight> = BTreeMap::new();
        for (&state, &weight) in column.values.iter().zip(&self.weights) {
            *counts.entry(state).or_insert(0) += weight;
        }
        Ok(counts)
    }

    /// Share of raw observations with `state` in `column`.
    ///
    /// Zero for an unknown column, an absent state or an empty table.
    pub fn state_probability<'a>(&self, column: impl Into<ColumnKey<'a>>, state: State) -> f64 {
        if self.total_weight == 0 {
            return 0.0;
        }
        match self.state_count(column, state) {
            Ok(count) => count as f64 / self.total_weight as f64,
            Err(_) => 0.0,
        }
    }

    /// Weight of the logical row at `row`.
    pub fn weight(&self, row: usize) -> Result<Weight> {
        self.weights
            .get(row)
            .copied()
            .ok_or_else(|| TableError::RowIndexOutOfRange {
                index: row,
                row_count: self.row_count(),
            })
    }

    pub fn weights(&self) -> &[Weight] {
        &self.weights
    }

    pub fn row(&self, index: usize) -> Result<LogicalRow> {
        let weight = self.weight(index)?;
        Ok(LogicalRow {
            states: self.feature_tuple(index),
            weight,
        })
    }

    pub fn rows(&self) -> impl Iterator<Item = LogicalRow> + '_ {
        (0..self.row_count()).map(move |index| LogicalRow {
            states: self.feature_tuple(index),
            weight: self.weights[index],
        })
    }
}
