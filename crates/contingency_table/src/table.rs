use core::fmt;
use std::collections::HashMap;
use std::collections::hash_map::Entry;

use itertools::Itertools;
use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::column::{ColumnKey, FeatureColumn, State, Weight};
use crate::conf::DEFAULT_WEIGHT_COLUMN;
use crate::error::{Result, TableError};
use crate::snapshot::TableSnapshot;

/// Weighted, deduplicating contingency table.
///
/// Every logical row is a unique tuple of feature states together with the
/// number of raw observations merged into it. The weight column is kept
/// apart from the feature columns and is never addressed by index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "TableSnapshot", try_from = "TableSnapshot")]
pub struct ContingencyTable {
    pub(crate) features: Vec<FeatureColumn>,
    pub(crate) weight_column: String,
    pub(crate) weights: Vec<Weight>,
    pub(crate) total_weight: Weight,
}

impl Default for ContingencyTable {
    fn default() -> Self {
        Self::new()
    }
}

impl ContingencyTable {
    pub fn new() -> Self {
        Self::with_weight_column(DEFAULT_WEIGHT_COLUMN)
    }

    pub fn with_weight_column(name: impl Into<String>) -> Self {
        Self {
            features: Vec::new(),
            weight_column: name.into(),
            weights: Vec::new(),
            total_weight: 0,
        }
    }

    /// Empty table with the given feature columns, in order.
    pub fn with_columns<I, S>(names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut table = Self::new();
        for name in names {
            table.add_column(name)?;
        }
        Ok(table)
    }

    pub fn weight_column(&self) -> &str {
        &self.weight_column
    }

    pub fn feature_count(&self) -> usize {
        self.features.len()
    }

    /// Feature columns plus the weight column.
    pub fn column_count(&self) -> usize {
        self.features.len() + 1
    }

    /// All column names in order, the weight column last.
    pub fn column_names(&self) -> Vec<&str> {
        self.features
            .iter()
            .map(|c| c.name.as_str())
            .chain(std::iter::once(self.weight_column.as_str()))
            .collect()
    }

    pub fn feature_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.features.iter().map(|c| c.name.as_str())
    }

    /// Number of logical (deduplicated) rows.
    pub fn row_count(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Number of raw observations held by the table.
    pub fn total_weight(&self) -> Weight {
        self.total_weight
    }

    pub(crate) fn resolve(&self, key: ColumnKey<'_>) -> Result<usize> {
        let found = match key {
            ColumnKey::Name(name) => self.features.iter().position(|c| c.name == name),
            ColumnKey::Index(index) => (index < self.features.len()).then_some(index),
        };
        found.ok_or_else(|| TableError::ColumnNotFound {
            column: key.to_string(),
        })
    }

    pub fn add_column(&mut self, name: impl Into<String>) -> Result<()> {
        let name = name.into();
        if name == self.weight_column || self.features.iter().any(|c| c.name == name) {
            return Err(TableError::DuplicateColumn { name });
        }
        if !self.weights.is_empty() {
            return Err(TableError::RowsAlreadyPresent { name });
        }
        self.features.push(FeatureColumn::new(name));
        Ok(())
    }

    /// Drops a feature column and merges the rows that became identical.
    pub fn remove_column<'a>(&mut self, column: impl Into<ColumnKey<'a>>) -> Result<()> {
        let index = self.resolve(column.into())?;
        let removed = self.features.remove(index);
        let merged = self.compact();
        debug!(
            "removed column '{}', merged {} rows, {} remain",
            removed.name,
            merged,
            self.row_count()
        );
        Ok(())
    }

    /// Records one raw observation.
    pub fn add_row(&mut self, values: &[State]) -> Result<()> {
        self.add_weighted_row(values, 1)
    }

    /// Records `weight` identical raw observations at once.
    pub fn add_weighted_row(&mut self, values: &[State], weight: Weight) -> Result<()> {
        if values.len() != self.features.len() {
            return Err(TableError::RowArityMismatch {
                expected: self.features.len(),
                actual: values.len(),
            });
        }
        if weight == 0 {
            return Err(TableError::ZeroWeight);
        }
        let total_weight = self
            .total_weight
            .checked_add(weight)
            .ok_or(TableError::WeightOverflow)?;

        match self.find_row(values) {
            Some(row) => {
                self.weights[row] = self.weights[row]
                    .checked_add(weight)
                    .ok_or(TableError::WeightOverflow)?;
                trace!(
                    "merged {:?} into row {} (weight {})",
                    values, row, self.weights[row]
                );
            }
            None => {
                for (column, &value) in self.features.iter_mut().zip(values) {
                    column.values.push(value);
                }
                self.weights.push(weight);
            }
        }
        self.total_weight = total_weight;
        Ok(())
    }

    /// Index of the logical row whose feature tuple equals `values`.
    pub fn find_row(&self, values: &[State]) -> Option<usize> {
        if values.len() != self.features.len() {
            return None;
        }
        (0..self.row_count()).find(|&row| {
            self.features
                .iter()
                .zip(values)
                .all(|(column, value)| column.values[row] == *value)
        })
    }

    /// Removes a logical row and returns its weight.
    ///
    /// The total weight drops by the row's weight, which is more than one
    /// whenever duplicates were merged into it.
    pub fn remove_row(&mut self, index: usize) -> Result<Weight> {
        if index >= self.row_count() {
            return Err(TableError::RowIndexOutOfRange {
                index,
                row_count: self.row_count(),
            });
        }
        for column in &mut self.features {
            column.values.remove(index);
        }
        let weight = self.weights.remove(index);
        self.total_weight -= weight;
        Ok(weight)
    }

    pub(crate) fn feature_tuple(&self, row: usize) -> Vec<State> {
        self.features.iter().map(|c| c.values[row]).collect()
    }

    /// Merges logical rows with identical feature tuples.
    ///
    /// The lowest-indexed row of each duplicate set survives and receives the
    /// summed weight; relative order of survivors is kept. Returns the number
    /// of rows merged away.
    pub fn compact(&mut self) -> usize {
        let row_count = self.row_count();
        if row_count < 2 {
            return 0;
        }

        let mut survivors: Vec<usize> = Vec::with_capacity(row_count);
        let mut merged_weights: Vec<Weight> = Vec::with_capacity(row_count);
        let mut slot_of: HashMap<Vec<State>, usize> = HashMap::with_capacity(row_count);
        for row in 0..row_count {
            match slot_of.entry(self.feature_tuple(row)) {
                Entry::Occupied(slot) => merged_weights[*slot.get()] += self.weights[row],
                Entry::Vacant(slot) => {
                    slot.insert(survivors.len());
                    survivors.push(row);
                    merged_weights.push(self.weights[row]);
                }
            }
        }

        let merged = row_count - survivors.len();
        if merged == 0 {
            return 0;
        }
        for column in &mut self.features {
            column.values = survivors.iter().map(|&row| column.values[row]).collect();
        }
        self.weights = merged_weights;
        debug!("compaction merged {} of {} rows", merged, row_count);
        merged
    }

    /// Writes the table dump to the `log` facade at debug level.
    pub fn log_contents(&self) {
        if log::log_enabled!(log::Level::Debug) {
            for line in self.to_string().lines() {
                debug!("{}", line);
            }
        }
    }
}

impl fmt::Display for ContingencyTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.column_names().iter().join(" "))?;
        for row in 0..self.row_count() {
            for column in &self.features {
                write!(f, "{} : {}|", column.name, column.values[row])?;
            }
            writeln!(f, "{} : {}|", self.weight_column, self.weights[row])?;
        }
        Ok(())
    }
}
