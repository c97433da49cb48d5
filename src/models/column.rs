//! Column model for the SDK

use crate::validation::ValidationError;
use serde::Deserialize;
use std::fmt;

/// Name of the synthetic surrogate key column
pub const HASH_ID_COLUMN: &str = "hash_id";

/// Name of the synthetic foreign key column on embedded tables
pub const PARENT_HASH_COLUMN: &str = "parent_hash";

/// SQL type used when rendering a column definition.
///
/// Only affects schema text. Values read from XML are always kept as strings.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Integer,
    Real,
    #[default]
    Text,
    Timestamp,
    Char(u32),
    Varchar(u32),
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnType::Integer => write!(f, "integer"),
            ColumnType::Real => write!(f, "real"),
            ColumnType::Text => write!(f, "text"),
            ColumnType::Timestamp => write!(f, "timestamp"),
            ColumnType::Char(len) => write!(f, "char({})", len),
            ColumnType::Varchar(len) => write!(f, "varchar({})", len),
        }
    }
}

/// Where a column's value comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnKind {
    /// Declared by the user, filled from the like-named child tag
    Declared,
    /// Surrogate key derived from the table's hash key columns
    HashId,
    /// Copy of the parent record's surrogate key
    ParentHash {
        /// Name of the referenced parent table
        parent_table: String,
    },
}

/// Column model representing a field in a table
///
/// # Example
///
/// ```rust
/// use xml_orm_sdk::models::{Column, ColumnType};
///
/// let column = Column::new("name").unwrap().not_null();
/// assert_eq!(column.to_string(), "name text not null");
///
/// let age = Column::new("age").unwrap().with_type(ColumnType::Integer);
/// assert_eq!(age.to_string(), "age integer");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    name: String,
    column_type: ColumnType,
    not_null: bool,
    primary_key: bool,
    kind: ColumnKind,
}

impl Column {
    /// Create a nullable text column.
    ///
    /// Fails with [`ValidationError::EmptyColumnName`] for an empty or
    /// whitespace-only name.
    pub fn new(name: impl Into<String>) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::EmptyColumnName);
        }
        Ok(Self {
            name,
            column_type: ColumnType::Text,
            not_null: false,
            primary_key: false,
            kind: ColumnKind::Declared,
        })
    }

    pub fn not_null(mut self) -> Self {
        self.not_null = true;
        self
    }

    pub fn with_type(mut self, column_type: ColumnType) -> Self {
        self.column_type = column_type;
        self
    }

    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }

    pub(crate) fn hash_id() -> Self {
        Self {
            name: HASH_ID_COLUMN.to_string(),
            column_type: ColumnType::Text,
            not_null: true,
            primary_key: true,
            kind: ColumnKind::HashId,
        }
    }

    pub(crate) fn parent_hash(parent_table: &str) -> Self {
        Self {
            name: PARENT_HASH_COLUMN.to_string(),
            column_type: ColumnType::Text,
            not_null: true,
            primary_key: false,
            kind: ColumnKind::ParentHash {
                parent_table: parent_table.to_string(),
            },
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn column_type(&self) -> &ColumnType {
        &self.column_type
    }

    pub fn is_not_null(&self) -> bool {
        self.not_null
    }

    pub fn is_primary_key(&self) -> bool {
        self.primary_key
    }

    pub fn kind(&self) -> &ColumnKind {
        &self.kind
    }

    /// True for `hash_id` and `parent_hash`
    pub fn is_synthetic(&self) -> bool {
        self.kind != ColumnKind::Declared
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.column_type)?;
        if self.primary_key {
            write!(f, " primary key")?;
        }
        if self.not_null {
            write!(f, " not null")?;
        }
        Ok(())
    }
}
