//! Schema: the store that owns every declared table
//!
//! Tables refer to their parent by [`TableId`]. A parent must already be part
//! of the schema when a child is declared, so the parent relation can never
//! contain a cycle or a self-reference.

use super::table::{Table, TableBuilder, TableId};
use crate::export::sql::SQLExporter;
use crate::import::{ImportError, TableReader};
use crate::validation::{ParentGraph, ValidationError};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

const XML_EXTENSION: &str = "xml";

#[derive(Debug, Clone, Default)]
pub struct Schema {
    tables: Vec<Table>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a table. Fails with a [`ValidationError`] for invalid declarations.
    pub fn add_table(&mut self, builder: TableBuilder) -> Result<TableId, ValidationError> {
        if self.table_by_name(&builder.name).is_some() {
            return Err(ValidationError::DuplicateTable { table: builder.name });
        }

        let parent = match builder.parent {
            Some(parent_id) => Some(self.table(parent_id).ok_or_else(|| ValidationError::UnknownParent {
                table: builder.name.clone(),
                parent: format!("#{}", parent_id.0),
            })?),
            None => None,
        };

        let id = TableId(self.tables.len());
        let table = builder.build(id, parent, &self.tables)?;
        debug!("Declared table {} ({} columns)", table.name(), table.columns().len());
        self.tables.push(table);
        Ok(id)
    }

    pub fn table(&self, id: TableId) -> Option<&Table> {
        self.tables.get(id.0)
    }

    pub fn table_mut(&mut self, id: TableId) -> Option<&mut Table> {
        self.tables.get_mut(id.0)
    }

    pub fn table_by_name(&self, name: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.name() == name)
    }

    pub fn id_of(&self, name: &str) -> Option<TableId> {
        self.table_by_name(name).map(Table::id)
    }

    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    pub fn parent_of(&self, id: TableId) -> Option<&Table> {
        self.table(id)
            .and_then(Table::parent_id)
            .and_then(|parent| self.table(parent))
    }

    /// Chain of tables from the top-level ancestor down to `id` itself.
    pub fn lineage(&self, id: TableId) -> Result<Vec<&Table>, ImportError> {
        let mut chain = Vec::new();
        let mut current = Some(id);
        while let Some(table_id) = current {
            let table = self
                .table(table_id)
                .ok_or_else(|| ImportError::UnknownTable(format!("#{}", table_id.0)))?;
            chain.push(table);
            current = table.parent_id();
        }
        chain.reverse();
        Ok(chain)
    }

    /// File stem a table reads from: its own override, else its top-level
    /// ancestor's file, else its own name.
    pub fn filename(&self, id: TableId) -> Result<String, ImportError> {
        let lineage = self.lineage(id)?;
        let explicit = lineage.iter().rev().find_map(|t| t.filename());
        let fallback = lineage[0].name();
        Ok(explicit.unwrap_or(fallback).to_string())
    }

    /// Location of the XML file for a table inside `data_dir`
    pub fn file_path(&self, id: TableId, data_dir: &Path) -> Result<PathBuf, ImportError> {
        let stem = self.filename(id)?;
        let path = data_dir.join(&stem);
        if path.extension().is_some_and(|ext| ext == XML_EXTENSION) {
            Ok(path)
        } else {
            Ok(data_dir.join(format!("{}.{}", stem, XML_EXTENSION)))
        }
    }

    /// Tables ordered so that every parent comes before its children
    pub fn read_order(&self) -> Result<Vec<TableId>, ValidationError> {
        let mut graph = ParentGraph::new();
        for table in &self.tables {
            graph.add_table(table.name())?;
        }
        for table in &self.tables {
            if let Some(parent) = self.parent_of(table.id()) {
                graph.add_parent(table.name(), parent.name())?;
            }
        }

        let order = graph
            .topological_order()?
            .iter()
            .filter_map(|name| self.id_of(name))
            .collect::<Vec<_>>();
        debug!(
            "Read order: {}",
            order
                .iter()
                .filter_map(|id| self.table(*id).map(Table::name))
                .collect::<Vec<_>>()
                .join(", ")
        );
        Ok(order)
    }

    /// Read the rows of one table from `data_dir`, replacing any earlier rows.
    ///
    /// The parent of an embedded table must have been read first. On failure the
    /// previously read rows are left untouched.
    pub fn read_table(&mut self, id: TableId, data_dir: impl AsRef<Path>) -> Result<(), ImportError> {
        let data_dir = data_dir.as_ref();
        let table = self
            .table(id)
            .ok_or_else(|| ImportError::UnknownTable(format!("#{}", id.0)))?;

        if let Some(parent) = self.parent_of(id) {
            if !parent.is_read() {
                return Err(ImportError::ParentNotRead {
                    table: table.name().to_string(),
                    parent: parent.name().to_string(),
                });
            }
            if parent.rows().is_empty() {
                warn!("Reading {} while its parent {} holds no rows", table.name(), parent.name());
            }
        }

        let path = self.file_path(id, data_dir)?;
        let rows = TableReader::new(self).read(id, &path)?;
        info!("Read {} rows for table {} from {}", rows.len(), table.name(), path.display());

        if let Some(table) = self.tables.get_mut(id.0) {
            table.replace_rows(rows);
        }
        Ok(())
    }

    /// Read every table, parents before children. Stops at the first failure.
    pub fn read_all(&mut self, data_dir: impl AsRef<Path>) -> Result<(), ImportError> {
        let data_dir = data_dir.as_ref();
        for id in self.read_order()? {
            self.read_table(id, data_dir)?;
        }
        Ok(())
    }

    /// `create table` and `create index` statements for every table, in
    /// declaration order, so every referenced table is created first.
    pub fn create_statements(&self) -> String {
        let mut sql = String::new();
        for table in &self.tables {
            sql.push_str(&SQLExporter::create_table(table));
            sql.push('\n');
            for index in SQLExporter::create_indexes(table) {
                sql.push_str(&index);
                sql.push('\n');
            }
        }
        sql
    }
}
