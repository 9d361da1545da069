use core::fmt;

use serde::{Deserialize, Serialize};

/// Integer-encoded categorical value.
pub type State = i32;

/// Number of raw observations merged into a logical row.
pub type Weight = u64;

/// Looks up a feature column either by name or by position.
///
/// Indices address feature columns only; the weight column has no index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKey<'a> {
    Name(&'a str),
    Index(usize),
}

impl<'a> From<&'a str> for ColumnKey<'a> {
    fn from(name: &'a str) -> Self {
        ColumnKey::Name(name)
    }
}

impl<'a> From<&'a String> for ColumnKey<'a> {
    fn from(name: &'a String) -> Self {
        ColumnKey::Name(name.as_str())
    }
}

impl From<usize> for ColumnKey<'_> {
    fn from(index: usize) -> Self {
        ColumnKey::Index(index)
    }
}

impl fmt::Display for ColumnKey<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnKey::Name(name) => write!(f, "'{}'", name),
            ColumnKey::Index(index) => write!(f, "#{}", index),
        }
    }
}

/// A named feature column, one state per logical row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureColumn {
    pub name: String,
    pub values: Vec<State>,
}

impl FeatureColumn {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn contains(&self, state: State) -> bool {
        self.values.contains(&state)
    }
}
