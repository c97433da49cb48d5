//! Foreign keys between declared tables

use super::table::TableId;

/// Declared foreign key: `column` of the declaring table references
/// `referenced_column` of `table`.
///
/// The referenced table must already be part of the schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignKey {
    pub column: String,
    pub table: TableId,
    pub referenced_column: String,
}

impl ForeignKey {
    pub fn new(column: impl Into<String>, table: TableId, referenced_column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            table,
            referenced_column: referenced_column.into(),
        }
    }
}

/// A foreign key with its target resolved to a table name, as rendered in
/// `create table`. Embedded tables carry one for `parent_hash`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    pub column: String,
    pub table: String,
    pub referenced_column: String,
}

