//! Table model for the SDK

use super::column::{Column, ColumnKind, HASH_ID_COLUMN, PARENT_HASH_COLUMN};
use super::foreign_key::{ForeignKey, Reference};
use super::index::Index;
use super::row::Row;
use super::tag_path::TagPath;
use crate::export::sql::SQLExporter;
use crate::validation::{TableValidator, ValidationError};
use std::fmt;

/// Handle of a table inside a [`Schema`](super::Schema)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TableId(pub(crate) usize);

impl TableId {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// Declaration of a table, turned into a [`Table`] by
/// [`Schema::add_table`](super::Schema::add_table).
///
/// # Example
///
/// ```rust
/// use xml_orm_sdk::models::{Column, Schema, TableBuilder};
///
/// let mut schema = Schema::new();
/// let people = schema
///     .add_table(
///         TableBuilder::new("people")
///             .top_tag("person/record")
///             .column(Column::new("name").unwrap().not_null())
///             .column(Column::new("last_name").unwrap().not_null())
///             .hash_key(["name", "last_name"]),
///     )
///     .unwrap();
///
/// let employers = schema
///     .add_table(
///         TableBuilder::new("employers")
///             .top_tag("person/record")
///             .tag_name("employers/employer")
///             .column(Column::new("name").unwrap().not_null())
///             .column(Column::new("address").unwrap())
///             .parent(people),
///     )
///     .unwrap();
///
/// assert_eq!(schema.table(employers).unwrap().parent_id(), Some(people));
/// ```
#[derive(Debug, Clone, Default)]
pub struct TableBuilder {
    pub(crate) name: String,
    pub(crate) top_tag: Option<String>,
    pub(crate) tag_name: Option<String>,
    pub(crate) columns: Vec<Column>,
    pub(crate) hash_key: Option<Vec<String>>,
    pub(crate) primary_key: Option<Vec<String>>,
    pub(crate) parent: Option<TableId>,
    pub(crate) foreign_keys: Vec<ForeignKey>,
    pub(crate) filename: Option<String>,
    pub(crate) indexes: Vec<Index>,
}

impl TableBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Path from the document root to the repeating record element
    pub fn top_tag(mut self, top_tag: impl Into<String>) -> Self {
        self.top_tag = Some(top_tag.into());
        self
    }

    /// Path of the repeating nested element, relative to the parent's record node
    pub fn tag_name(mut self, tag_name: impl Into<String>) -> Self {
        self.tag_name = Some(tag_name.into());
        self
    }

    pub fn column(mut self, column: Column) -> Self {
        self.columns.push(column);
        self
    }

    pub fn columns(mut self, columns: impl IntoIterator<Item = Column>) -> Self {
        self.columns.extend(columns);
        self
    }

    /// Columns whose values, in this order, seed the `hash_id` surrogate key
    pub fn hash_key<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.hash_key = Some(columns.into_iter().map(Into::into).collect());
        self
    }

    /// Composite primary key over declared columns. Cannot be combined with
    /// `hash_key` or with a column-level primary key.
    pub fn primary_key<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.primary_key = Some(columns.into_iter().map(Into::into).collect());
        self
    }

    pub fn parent(mut self, parent: TableId) -> Self {
        self.parent = Some(parent);
        self
    }

    pub fn foreign_key(mut self, foreign_key: ForeignKey) -> Self {
        self.foreign_keys.push(foreign_key);
        self
    }

    /// Override the XML file stem (defaults to the table name)
    pub fn filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    pub fn index(mut self, index: Index) -> Self {
        self.indexes.push(index);
        self
    }

    /// `tables` holds every table declared before this one.
    pub(crate) fn build(
        self,
        id: TableId,
        parent: Option<&Table>,
        tables: &[Table],
    ) -> Result<Table, ValidationError> {
        let (top_tag, tag_name) = TableValidator::validate(&self, parent)?;

        let mut columns = self.columns;
        if self.hash_key.is_some() {
            columns.push(Column::hash_id());
        }
        if let Some(parent) = parent {
            columns.push(Column::parent_hash(&parent.name));
        }

        TableValidator::validate_indexes(&self.name, &columns, &self.indexes)?;
        let mut references = TableValidator::validate_foreign_keys(&self.name, &columns, &self.foreign_keys, tables)?;
        if let Some(parent) = parent {
            references.push(Reference {
                column: PARENT_HASH_COLUMN.to_string(),
                table: parent.name.clone(),
                referenced_column: HASH_ID_COLUMN.to_string(),
            });
        }

        Ok(Table {
            id,
            name: self.name,
            top_tag,
            tag_name,
            columns,
            hash_key: self.hash_key,
            primary_key: self.primary_key,
            parent: parent.map(|p| p.id),
            references,
            filename: self.filename,
            indexes: self.indexes,
            rows: None,
        })
    }
}

/// A declared table together with the rows read for it.
///
/// `columns` holds the effective column set: declared columns in declaration
/// order, followed by `hash_id` when a hash key is set and `parent_hash` when a
/// parent table is set. Schema text and row building both read this list.
#[derive(Debug, Clone)]
pub struct Table {
    id: TableId,
    name: String,
    top_tag: TagPath,
    tag_name: Option<TagPath>,
    columns: Vec<Column>,
    hash_key: Option<Vec<String>>,
    primary_key: Option<Vec<String>>,
    parent: Option<TableId>,
    references: Vec<Reference>,
    filename: Option<String>,
    indexes: Vec<Index>,
    rows: Option<Vec<Row>>,
}

impl Table {
    pub fn id(&self) -> TableId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn top_tag(&self) -> &TagPath {
        &self.top_tag
    }

    pub fn tag_name(&self) -> Option<&TagPath> {
        self.tag_name.as_ref()
    }

    /// Effective columns, synthetic ones included
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn declared_columns(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter().filter(|c| !c.is_synthetic())
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name() == name)
    }

    pub fn hash_key(&self) -> Option<&[String]> {
        self.hash_key.as_deref()
    }

    /// Table-level composite primary key
    pub fn primary_key(&self) -> Option<&[String]> {
        self.primary_key.as_deref()
    }

    /// Foreign keys: declared ones first, then `parent_hash` for embedded tables
    pub fn references(&self) -> &[Reference] {
        &self.references
    }

    pub fn parent_id(&self) -> Option<TableId> {
        self.parent
    }

    /// Name of the table referenced by `parent_hash`
    pub fn parent_name(&self) -> Option<&str> {
        self.columns.iter().find_map(|c| match c.kind() {
            ColumnKind::ParentHash { parent_table } => Some(parent_table.as_str()),
            _ => None,
        })
    }

    pub fn is_embedded(&self) -> bool {
        self.parent.is_some()
    }

    /// Explicitly assigned file stem, if any
    pub fn filename(&self) -> Option<&str> {
        self.filename.as_deref()
    }

    pub fn set_filename(&mut self, filename: impl Into<String>) {
        self.filename = Some(filename.into());
    }

    pub fn indexes(&self) -> &[Index] {
        &self.indexes
    }

    /// Rows from the last successful read, empty before the first one
    pub fn rows(&self) -> &[Row] {
        self.rows.as_deref().unwrap_or(&[])
    }

    pub fn is_read(&self) -> bool {
        self.rows.is_some()
    }

    pub(crate) fn replace_rows(&mut self, rows: Vec<Row>) {
        self.rows = Some(rows);
    }

    /// Values of a row in effective column order
    pub fn row_values<'r>(&self, row: &'r Row) -> Vec<Option<&'r str>> {
        self.columns.iter().map(|c| row.get(c.name())).collect()
    }

    /// `create table` statement for this table
    pub fn create_statement(&self) -> String {
        SQLExporter::create_table(self)
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.create_statement())
    }
}
