//! Row model: one materialized record of a table

use super::column::{HASH_ID_COLUMN, PARENT_HASH_COLUMN};
use serde::Serialize;
use std::collections::BTreeMap;

/// Mapping of column name to a string value or null.
///
/// Includes the synthetic `hash_id` / `parent_hash` columns when the table has them.
/// Rows are never mutated once built.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct Row {
    values: BTreeMap<String, Option<String>>,
}

impl Row {
    pub(crate) fn new(values: BTreeMap<String, Option<String>>) -> Self {
        Self { values }
    }

    /// Value of a column, `None` when null or not part of the row
    pub fn get(&self, column: &str) -> Option<&str> {
        self.values.get(column).and_then(|v| v.as_deref())
    }

    pub fn contains_column(&self, column: &str) -> bool {
        self.values.contains_key(column)
    }

    pub fn hash_id(&self) -> Option<&str> {
        self.get(HASH_ID_COLUMN)
    }

    pub fn parent_hash(&self) -> Option<&str> {
        self.get(PARENT_HASH_COLUMN)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_deref()))
    }
}
