//! Table validation functionality
//!
//! Checks a table declaration before it becomes part of a schema: column
//! naming, key references, tag paths and the parent linkage.

use super::ValidationError;
use crate::models::column::{Column, HASH_ID_COLUMN, PARENT_HASH_COLUMN};
use crate::models::foreign_key::{ForeignKey, Reference};
use crate::models::index::Index;
use crate::models::table::{Table, TableBuilder};
use crate::models::tag_path::TagPath;
use std::collections::HashSet;

/// Table validator
pub struct TableValidator;

impl TableValidator {
    /// Validate a declaration and return its parsed `top_tag` and `tag_name`.
    pub fn validate(
        builder: &TableBuilder,
        parent: Option<&Table>,
    ) -> Result<(TagPath, Option<TagPath>), ValidationError> {
        let table = builder.name.as_str();
        if table.trim().is_empty() {
            return Err(ValidationError::EmptyTableName);
        }

        let top_tag = match &builder.top_tag {
            Some(top_tag) => TagPath::parse(top_tag)?,
            None => {
                return Err(ValidationError::MissingTopTag {
                    table: table.to_string(),
                });
            }
        };
        let tag_name = builder
            .tag_name
            .as_deref()
            .map(TagPath::parse)
            .transpose()?;

        Self::validate_columns(table, &builder.columns, builder.hash_key.is_some(), parent.is_some())?;
        if let Some(hash_key) = &builder.hash_key {
            Self::validate_hash_key(table, &builder.columns, hash_key)?;
        }
        Self::validate_primary_key(
            table,
            &builder.columns,
            builder.primary_key.as_deref(),
            builder.hash_key.is_some(),
        )?;

        if let Some(parent) = parent {
            if tag_name.is_none() {
                return Err(ValidationError::MissingTagName {
                    table: table.to_string(),
                });
            }
            if parent.hash_key().is_none() {
                return Err(ValidationError::ParentWithoutHashKey {
                    table: table.to_string(),
                    parent: parent.name().to_string(),
                });
            }
            if parent.top_tag() != &top_tag {
                return Err(ValidationError::TopTagMismatch {
                    table: table.to_string(),
                    top_tag: top_tag.to_string(),
                    parent_top_tag: parent.top_tag().to_string(),
                });
            }
        }

        Ok((top_tag, tag_name))
    }

    fn validate_columns(
        table: &str,
        columns: &[Column],
        has_hash_key: bool,
        has_parent: bool,
    ) -> Result<(), ValidationError> {
        let mut seen = HashSet::new();
        for column in columns {
            let name = column.name();
            if (has_hash_key && name == HASH_ID_COLUMN) || (has_parent && name == PARENT_HASH_COLUMN) {
                return Err(ValidationError::ReservedColumnName {
                    table: table.to_string(),
                    column: name.to_string(),
                });
            }
            if !seen.insert(name) {
                return Err(ValidationError::DuplicateColumn {
                    table: table.to_string(),
                    column: name.to_string(),
                });
            }
        }
        Ok(())
    }

    fn validate_hash_key(table: &str, columns: &[Column], hash_key: &[String]) -> Result<(), ValidationError> {
        if hash_key.is_empty() {
            return Err(ValidationError::EmptyHashKey {
                table: table.to_string(),
            });
        }
        for key in hash_key {
            if !columns.iter().any(|c| c.name() == key) {
                return Err(ValidationError::UnknownHashKeyColumn {
                    table: table.to_string(),
                    column: key.clone(),
                });
            }
        }
        Ok(())
    }

    fn validate_primary_key(
        table: &str,
        columns: &[Column],
        primary_key: Option<&[String]>,
        has_hash_key: bool,
    ) -> Result<(), ValidationError> {
        let conflict = |reason: String| ValidationError::PrimaryKeyConflict {
            table: table.to_string(),
            reason,
        };

        let flagged = columns.iter().filter(|c| c.is_primary_key()).count();
        if has_hash_key && (flagged > 0 || primary_key.is_some()) {
            return Err(conflict(
                "a table with a hash key cannot declare its own primary key".to_string(),
            ));
        }
        if flagged > 1 {
            return Err(conflict(format!(
                "{} columns are flagged as primary key, declare a composite key on the table instead",
                flagged
            )));
        }

        let Some(primary_key) = primary_key else {
            return Ok(());
        };
        if flagged > 0 {
            return Err(conflict(
                "a column primary key cannot be combined with a table primary key".to_string(),
            ));
        }
        if primary_key.is_empty() {
            return Err(conflict("the primary key lists no columns".to_string()));
        }
        let mut seen = HashSet::new();
        for key in primary_key {
            if !columns.iter().any(|c| c.name() == key) {
                return Err(ValidationError::UnknownPrimaryKeyColumn {
                    table: table.to_string(),
                    column: key.clone(),
                });
            }
            if !seen.insert(key) {
                return Err(conflict(format!("primary key lists '{}' twice", key)));
            }
        }
        Ok(())
    }

    /// Resolve declared foreign keys against the tables declared so far.
    pub fn validate_foreign_keys(
        table: &str,
        columns: &[Column],
        foreign_keys: &[ForeignKey],
        tables: &[Table],
    ) -> Result<Vec<Reference>, ValidationError> {
        foreign_keys
            .iter()
            .map(|foreign_key| {
                if !columns.iter().any(|c| c.name() == foreign_key.column) {
                    return Err(ValidationError::UnknownForeignKeyColumn {
                        table: table.to_string(),
                        column: foreign_key.column.clone(),
                    });
                }
                let target = tables.get(foreign_key.table.index()).ok_or_else(|| {
                    ValidationError::UnknownReferencedTable {
                        table: table.to_string(),
                        column: foreign_key.column.clone(),
                    }
                })?;
                if target.column(&foreign_key.referenced_column).is_none() {
                    return Err(ValidationError::UnknownReferencedColumn {
                        table: table.to_string(),
                        referenced_table: target.name().to_string(),
                        column: foreign_key.referenced_column.clone(),
                    });
                }
                Ok(Reference {
                    column: foreign_key.column.clone(),
                    table: target.name().to_string(),
                    referenced_column: foreign_key.referenced_column.clone(),
                })
            })
            .collect()
    }

    /// Index columns may name synthetic columns too, so this runs on the effective set.
    pub fn validate_indexes(table: &str, columns: &[Column], indexes: &[Index]) -> Result<(), ValidationError> {
        for index in indexes {
            if index.columns.is_empty() {
                return Err(ValidationError::UnknownIndexColumn {
                    table: table.to_string(),
                    index: index.name.clone(),
                    column: String::new(),
                });
            }
            for column in &index.columns {
                if !columns.iter().any(|c| c.name() == column) {
                    return Err(ValidationError::UnknownIndexColumn {
                        table: table.to_string(),
                        index: index.name.clone(),
                        column: column.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}
