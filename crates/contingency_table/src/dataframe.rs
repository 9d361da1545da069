use log::debug;
use polars::prelude::*;

use crate::column::{State, Weight};
use crate::conf::DEFAULT_WEIGHT_COLUMN;
use crate::error::{Result, TableError};
use crate::table::ContingencyTable;

fn polars_err(err: PolarsError) -> TableError {
    TableError::DataFrame(err.to_string())
}

/// Extension methods for Series
pub trait TableSeriesExt {
    /// Categorical codes of an integer, Enum or Categorical series.
    /// Nulls and values outside the `i32` range come back as `None`.
    fn state_codes(&self) -> Result<Vec<Option<State>>>;

    /// Row weights; nulls and non-positive values come back as 0.
    /// Fractional, infinite, NaN or out-of-range float weights are errors.
    fn row_weights(&self) -> Result<Vec<Weight>>;
}

impl TableSeriesExt for Series {
    fn state_codes(&self) -> Result<Vec<Option<State>>> {
        let codes = match self.dtype() {
            DataType::Enum(_, _) | DataType::Categorical(_, _) => {
                self.to_physical_repr().into_owned()
            }
            dtype if dtype.is_integer() => self.clone(),
            other => {
                return Err(TableError::DataFrame(format!(
                    "column '{}' has dtype {:?}, expected integer or categorical",
                    self.name(),
                    other
                )));
            }
        };
        let codes = codes.cast(&DataType::Int32).map_err(polars_err)?;
        Ok(codes.i32().map_err(polars_err)?.into_iter().collect())
    }

    fn row_weights(&self) -> Result<Vec<Weight>> {
        let dtype = self.dtype();
        if dtype.is_integer() {
            // negative weights fail the cast and come back as null
            let weights = self.cast(&DataType::UInt64).map_err(polars_err)?;
            return Ok(weights
                .u64()
                .map_err(polars_err)?
                .into_iter()
                .map(|w| w.unwrap_or(0))
                .collect());
        }
        if !dtype.is_primitive_numeric() {
            return Err(TableError::DataFrame(format!(
                "weight column '{}' has dtype {:?}, expected numeric",
                self.name(),
                dtype
            )));
        }
        let weights = self.cast(&DataType::Float64).map_err(polars_err)?;
        weights
            .f64()
            .map_err(polars_err)?
            .into_iter()
            .enumerate()
            .map(|(idx, w)| match w {
                None => Ok(0),
                Some(w) if w <= 0.0 => Ok(0),
                Some(w) if !w.is_finite() || w.fract() != 0.0 || w >= Weight::MAX as f64 => {
                    Err(TableError::DataFrame(format!(
                        "weight column '{}' has non-integral weight {} at row {}",
                        self.name(),
                        w,
                        idx
                    )))
                }
                Some(w) => Ok(w as Weight),
            })
            .collect()
    }
}

/// Extension methods for DataFrame
pub trait TableDataFrameExt {
    fn to_contingency_table(&self, weight_column: Option<&str>) -> Result<ContingencyTable>;
}

impl TableDataFrameExt for DataFrame {
    fn to_contingency_table(&self, weight_column: Option<&str>) -> Result<ContingencyTable> {
        ContingencyTable::from_dataframe(self, weight_column)
    }
}

impl ContingencyTable {
    /// Builds a table from observation rows.
    ///
    /// Every column except the weight column becomes a feature column. The
    /// weight column defaults to [`DEFAULT_WEIGHT_COLUMN`]; when `df` has no
    /// such column each row weighs 1. Rows whose weight is null, zero or
    /// negative are skipped.
    pub fn from_dataframe(df: &DataFrame, weight_column: Option<&str>) -> Result<Self> {
        let weight_name = weight_column.unwrap_or(DEFAULT_WEIGHT_COLUMN);
        let mut table = ContingencyTable::with_weight_column(weight_name);

        let mut codes: Vec<Vec<Option<State>>> = Vec::new();
        let mut weights: Option<Vec<Weight>> = None;
        for column in df.get_columns() {
            let series = column.as_materialized_series();
            if series.name().as_str() == weight_name {
                weights = Some(series.row_weights()?);
                continue;
            }
            table.add_column(series.name().as_str())?;
            codes.push(series.state_codes()?);
        }

        let mut skipped = 0usize;
        let mut row: Vec<State> = Vec::with_capacity(codes.len());
        for idx in 0..df.height() {
            let weight = weights.as_ref().map_or(1, |w| w[idx]);
            if weight == 0 {
                skipped += 1;
                continue;
            }
            row.clear();
            for (column, values) in codes.iter().enumerate() {
                let value = values[idx].ok_or_else(|| {
                    TableError::DataFrame(format!(
                        "column '{}' has no state at row {}",
                        table.features[column].name, idx
                    ))
                })?;
                row.push(value);
            }
            table.add_weighted_row(&row, weight)?;
        }

        debug!(
            "loaded {} observations into {} rows ({} skipped)",
            table.total_weight(),
            table.row_count(),
            skipped
        );
        Ok(table)
    }

    /// One `Int32` column per feature and a `UInt64` weight column.
    pub fn to_dataframe(&self) -> Result<DataFrame> {
        let mut columns: Vec<Column> = self
            .features
            .iter()
            .map(|c| Series::new(PlSmallStr::from(c.name.as_str()), c.values.as_slice()).into())
            .collect();
        columns.push(
            Series::new(
                PlSmallStr::from(self.weight_column.as_str()),
                self.weights.as_slice(),
            )
            .into(),
        );
        DataFrame::new(columns).map_err(polars_err)
    }
}
