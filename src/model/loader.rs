//! Schema loading functionality
//!
//! Declares a [`Schema`] from a YAML or TOML configuration document.
//!
//! ```yaml
//! tables:
//!   - name: people
//!     top_tag: person/record
//!     hash_key: [name, last_name]
//!     columns:
//!       - { name: name, not_null: true }
//!       - { name: last_name, not_null: true }
//!   - name: employers
//!     top_tag: person/record
//!     tag_name: employers/employer
//!     parent: people
//!     columns:
//!       - { name: name, not_null: true }
//!       - { name: address }
//! ```
//!
//! Parents and foreign key targets are referenced by name and may be declared
//! after the tables that use them.

use crate::models::{Column, ColumnType, ForeignKey, Index, Schema, TableBuilder};
use crate::validation::{ParentGraph, ValidationError};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use tracing::info;

/// Top-level configuration document
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct SchemaConfig {
    #[serde(default)]
    pub tables: Vec<TableConfig>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct TableConfig {
    pub name: String,
    pub top_tag: Option<String>,
    pub tag_name: Option<String>,
    #[serde(default)]
    pub columns: Vec<ColumnConfig>,
    pub hash_key: Option<Vec<String>>,
    /// Composite primary key
    pub primary_key: Option<Vec<String>>,
    /// Name of the parent table
    pub parent: Option<String>,
    pub filename: Option<String>,
    #[serde(default)]
    pub indexes: Vec<Index>,
    #[serde(default)]
    pub foreign_keys: Vec<ForeignKeyConfig>,
}

/// Foreign key with its target table given by name
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ForeignKeyConfig {
    pub column: String,
    pub table: String,
    pub references: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ColumnConfig {
    pub name: String,
    #[serde(default, rename = "type")]
    pub column_type: ColumnType,
    #[serde(default)]
    pub not_null: bool,
    #[serde(default)]
    pub primary_key: bool,
}

impl ColumnConfig {
    fn to_column(&self) -> Result<Column, ValidationError> {
        let mut column = Column::new(self.name.clone())?.with_type(self.column_type.clone());
        if self.not_null {
            column = column.not_null();
        }
        if self.primary_key {
            column = column.primary_key();
        }
        Ok(column)
    }
}

/// Error while loading a schema configuration
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Failed to read {path}: {message}")]
    Io { path: String, message: String },
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("Failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Unsupported configuration format: {0}")]
    UnsupportedFormat(String),
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Builds schemas from configuration documents
pub struct SchemaLoader;

impl SchemaLoader {
    pub fn from_yaml_str(content: &str) -> Result<Schema, LoadError> {
        let config: SchemaConfig = serde_yaml::from_str(content)?;
        Ok(Self::build(&config)?)
    }

    pub fn from_toml_str(content: &str) -> Result<Schema, LoadError> {
        let config: SchemaConfig = toml::from_str(content)?;
        Ok(Self::build(&config)?)
    }

    /// Load a `.yaml`, `.yml` or `.toml` file
    pub fn load_file(path: impl AsRef<Path>) -> Result<Schema, LoadError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| LoadError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        let schema = match extension.as_str() {
            "yaml" | "yml" => Self::from_yaml_str(&content)?,
            "toml" => Self::from_toml_str(&content)?,
            _ => return Err(LoadError::UnsupportedFormat(path.display().to_string())),
        };

        info!("Loaded {} tables from {}", schema.len(), path.display());
        Ok(schema)
    }

    /// Declare every configured table, parents and referenced tables first.
    pub fn build(config: &SchemaConfig) -> Result<Schema, ValidationError> {
        let mut graph = ParentGraph::new();
        for table in &config.tables {
            graph.add_table(&table.name)?;
        }
        for table in &config.tables {
            if let Some(parent) = &table.parent {
                graph.add_parent(&table.name, parent)?;
            }
            for foreign_key in &table.foreign_keys {
                graph.add_reference(&table.name, &foreign_key.column, &foreign_key.table)?;
            }
        }

        let by_name: HashMap<&str, &TableConfig> =
            config.tables.iter().map(|t| (t.name.as_str(), t)).collect();

        let mut schema = Schema::new();
        for name in graph.topological_order()? {
            let table = by_name
                .get(name.as_str())
                .ok_or_else(|| ValidationError::Config(format!("table '{}' vanished during ordering", name)))?;
            let builder = Self::builder(table, &schema)?;
            schema.add_table(builder)?;
        }
        Ok(schema)
    }

    fn builder(table: &TableConfig, schema: &Schema) -> Result<TableBuilder, ValidationError> {
        let columns = table
            .columns
            .iter()
            .map(ColumnConfig::to_column)
            .collect::<Result<Vec<_>, _>>()?;

        let mut builder = TableBuilder::new(table.name.clone()).columns(columns);
        if let Some(top_tag) = &table.top_tag {
            builder = builder.top_tag(top_tag.clone());
        }
        if let Some(tag_name) = &table.tag_name {
            builder = builder.tag_name(tag_name.clone());
        }
        if let Some(hash_key) = &table.hash_key {
            builder = builder.hash_key(hash_key.iter().cloned());
        }
        if let Some(primary_key) = &table.primary_key {
            builder = builder.primary_key(primary_key.iter().cloned());
        }
        if let Some(filename) = &table.filename {
            builder = builder.filename(filename.clone());
        }
        if let Some(parent) = &table.parent {
            let parent_id = schema.id_of(parent).ok_or_else(|| ValidationError::UnknownParent {
                table: table.name.clone(),
                parent: parent.clone(),
            })?;
            builder = builder.parent(parent_id);
        }
        for foreign_key in &table.foreign_keys {
            let target = schema
                .id_of(&foreign_key.table)
                .ok_or_else(|| ValidationError::UnknownReferencedTable {
                    table: table.name.clone(),
                    column: foreign_key.column.clone(),
                })?;
            builder = builder.foreign_key(ForeignKey::new(
                foreign_key.column.clone(),
                target,
                foreign_key.references.clone(),
            ));
        }
        for index in &table.indexes {
            builder = builder.index(index.clone());
        }
        Ok(builder)
    }
}
