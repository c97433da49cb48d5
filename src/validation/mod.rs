//! Validation functionality
//!
//! Provides validation logic for:
//! - Table declarations (column names, hash keys, primary and foreign keys,
//!   tag paths, parent linkage)
//! - Parent relations between tables (self-references, cycles)

pub mod relationships;
pub mod tables;

pub use relationships::ParentGraph;
pub use tables::TableValidator;

/// Structurally invalid table or column declaration.
///
/// Raised while declaring tables, never while reading data.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Table name must not be empty")]
    EmptyTableName,
    #[error("Column name must not be empty")]
    EmptyColumnName,
    #[error("Table '{table}' declares column '{column}' more than once")]
    DuplicateColumn { table: String, column: String },
    #[error("Table '{table}' hash key references undeclared column '{column}'")]
    UnknownHashKeyColumn { table: String, column: String },
    #[error("Table '{table}' declares an empty hash key")]
    EmptyHashKey { table: String },
    #[error("Table '{table}' cannot declare column '{column}': the name is reserved")]
    ReservedColumnName { table: String, column: String },
    #[error("Invalid tag path '{path}': {reason}")]
    InvalidTagPath { path: String, reason: String },
    #[error("Table '{table}' must declare a top_tag")]
    MissingTopTag { table: String },
    #[error("Embedded table '{table}' must declare a tag_name")]
    MissingTagName { table: String },
    #[error("Embedded table '{table}' uses top_tag '{top_tag}' but its parent uses '{parent_top_tag}'")]
    TopTagMismatch {
        table: String,
        top_tag: String,
        parent_top_tag: String,
    },
    #[error("Parent table '{parent}' of '{table}' has no hash key")]
    ParentWithoutHashKey { table: String, parent: String },
    #[error("Table '{table}' references unknown parent '{parent}'")]
    UnknownParent { table: String, parent: String },
    #[error("Table '{table}' cannot reference itself")]
    SelfReference { table: String },
    #[error("Circular table relation: {}", .cycle.join(" -> "))]
    CircularParent { cycle: Vec<String> },
    #[error("Table '{table}' is declared more than once")]
    DuplicateTable { table: String },
    #[error("Table '{table}': {reason}")]
    PrimaryKeyConflict { table: String, reason: String },
    #[error("Table '{table}' primary key references undeclared column '{column}'")]
    UnknownPrimaryKeyColumn { table: String, column: String },
    #[error("Table '{table}' declares a foreign key on unknown column '{column}'")]
    UnknownForeignKeyColumn { table: String, column: String },
    #[error("Foreign key on '{table}.{column}' references a table that is not declared")]
    UnknownReferencedTable { table: String, column: String },
    #[error("Foreign key on table '{table}' references unknown column '{referenced_table}.{column}'")]
    UnknownReferencedColumn {
        table: String,
        referenced_table: String,
        column: String,
    },
    #[error("Index '{index}' on table '{table}' references unknown column '{column}'")]
    UnknownIndexColumn {
        table: String,
        index: String,
        column: String,
    },
    #[error("Configuration error: {0}")]
    Config(String),
}
