use itertools::Itertools;
use log::debug;

use crate::column::{ColumnKey, State};
use crate::conf::ColumnRetention;
use crate::error::{Result, TableError};
use crate::table::ContingencyTable;

impl ContingencyTable {
    /// Independent sub-table holding only the rows where `column == state`.
    ///
    /// Filtering by name keeps the filtered column; filtering by index drops
    /// it and merges the rows that become identical. Use
    /// [`ContingencyTable::filter_by_state_with`] to choose explicitly.
    pub fn filter_by_state<'a>(
        &self,
        column: impl Into<ColumnKey<'a>>,
        state: State,
    ) -> Result<ContingencyTable> {
        let key = column.into();
        self.filter_by_state_with(key, state, ColumnRetention::for_key(&key))
    }

    pub fn filter_by_state_with<'a>(
        &self,
        column: impl Into<ColumnKey<'a>>,
        state: State,
        retention: ColumnRetention,
    ) -> Result<ContingencyTable> {
        let index = self.resolve(column.into())?;
        let source = &self.features[index];
        if !source.contains(state) {
            return Err(TableError::StateNotPresent {
                column: source.name.clone(),
                state,
            });
        }

        let mut filtered = self.clone();
        let rejected: Vec<usize> = source.values.iter().positions(|&v| v != state).collect();
        // highest index first so earlier positions stay valid
        for row in rejected.into_iter().rev() {
            filtered.remove_row(row)?;
        }
        if retention.drops_column() {
            filtered.remove_column(index)?;
        }

        debug!(
            "filtered '{}' == {}: {} rows, total weight {}",
            source.name,
            state,
            filtered.row_count(),
            filtered.total_weight()
        );
        Ok(filtered)
    }
}
