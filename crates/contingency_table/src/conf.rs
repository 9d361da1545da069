use crate::column::ColumnKey;

pub const DEFAULT_WEIGHT_COLUMN: &str = "Weight";

/// Whether a filtered table keeps the column it was filtered on.
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum ColumnRetention {
    Keep,
    Drop,
}

impl ColumnRetention {
    /// Retention implied by the kind of lookup: filtering by name keeps the
    /// column, filtering by index drops it.
    pub fn for_key(key: &ColumnKey<'_>) -> Self {
        match key {
            ColumnKey::Name(_) => ColumnRetention::Keep,
            ColumnKey::Index(_) => ColumnRetention::Drop,
        }
    }

    pub fn drops_column(&self) -> bool {
        matches!(self, ColumnRetention::Drop)
    }
}
