//! SQL exporter for generating CREATE TABLE statements from table declarations.
//!
//! Identifiers are emitted verbatim, without quoting or escaping. Callers that
//! need a specific SQL dialect must post-process the text.

use crate::export::{ExportError, ExportResult};
use crate::models::{Schema, Table};

/// Exporter for SQL CREATE TABLE format.
pub struct SQLExporter;

impl SQLExporter {
    /// Export a table to a `create table` statement.
    ///
    /// Columns appear in effective order: declared columns, then `hash_id`
    /// (primary key) and `parent_hash` when present. Foreign key constraints
    /// follow, declared ones first and then `parent_hash` referencing the
    /// parent's `hash_id`. A composite primary key comes last.
    ///
    /// # Example
    ///
    /// ```rust
    /// use xml_orm_sdk::export::sql::SQLExporter;
    /// use xml_orm_sdk::models::{Column, Schema, TableBuilder};
    ///
    /// let mut schema = Schema::new();
    /// let id = schema
    ///     .add_table(
    ///         TableBuilder::new("people")
    ///             .top_tag("person/record")
    ///             .column(Column::new("name").unwrap().not_null())
    ///             .hash_key(["name"]),
    ///     )
    ///     .unwrap();
    ///
    /// let sql = SQLExporter::create_table(schema.table(id).unwrap());
    /// assert_eq!(
    ///     sql,
    ///     "create table if not exists people (\n  name text not null,\n  hash_id text primary key not null\n);"
    /// );
    /// ```
    pub fn create_table(table: &Table) -> String {
        let mut definitions: Vec<String> = table
            .columns()
            .iter()
            .map(|column| format!("  {}", column))
            .collect();

        for reference in table.references() {
            definitions.push(format!(
                "  foreign key ({}) references {} ({})",
                reference.column, reference.table, reference.referenced_column
            ));
        }
        if let Some(primary_key) = table.primary_key() {
            definitions.push(format!("  primary key ({})", primary_key.join(", ")));
        }

        format!(
            "create table if not exists {} (\n{}\n);",
            table.name(),
            definitions.join(",\n")
        )
    }

    /// `create index` statements for a table's declared indexes
    pub fn create_indexes(table: &Table) -> Vec<String> {
        table
            .indexes()
            .iter()
            .map(|index| {
                format!(
                    "create{} index if not exists {} on {} ({});",
                    if index.unique { " unique" } else { "" },
                    index.name,
                    table.name(),
                    index.columns.join(", ")
                )
            })
            .collect()
    }

    /// Export every table of a schema in declaration order.
    pub fn export(&self, schema: &Schema) -> Result<ExportResult, ExportError> {
        Ok(ExportResult {
            content: schema.create_statements(),
            format: "sql".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Column, ColumnType, ForeignKey, Index, TableBuilder};

    fn schema() -> Schema {
        let mut schema = Schema::new();
        let people = schema
            .add_table(
                TableBuilder::new("people")
                    .top_tag("person/record")
                    .column(Column::new("name").unwrap().not_null())
                    .column(Column::new("last_name").unwrap().not_null())
                    .hash_key(["name", "last_name"]),
            )
            .unwrap();
        schema
            .add_table(
                TableBuilder::new("employers")
                    .top_tag("person/record")
                    .tag_name("employers/employer")
                    .column(Column::new("name").unwrap().not_null())
                    .column(Column::new("address").unwrap())
                    .parent(people)
                    .index(Index::new("employers_parent_idx", ["parent_hash"])),
            )
            .unwrap();
        schema
    }

    #[test]
    fn test_create_parent_table() {
        let schema = schema();
        let sql = SQLExporter::create_table(schema.table_by_name("people").unwrap());
        assert_eq!(
            sql,
            "create table if not exists people (\n  name text not null,\n  last_name text not null,\n  hash_id text primary key not null\n);"
        );
    }

    #[test]
    fn test_create_embedded_table() {
        let schema = schema();
        let sql = SQLExporter::create_table(schema.table_by_name("employers").unwrap());
        assert_eq!(
            sql,
            "create table if not exists employers (\n  name text not null,\n  address text,\n  parent_hash text not null,\n  foreign key (parent_hash) references people (hash_id)\n);"
        );
    }

    #[test]
    fn test_create_plain_table() {
        let mut schema = Schema::new();
        let id = schema
            .add_table(
                TableBuilder::new("readings")
                    .top_tag("DATA_RECORDS/DATA_RECORD")
                    .column(Column::new("id").unwrap().with_type(ColumnType::Integer).primary_key())
                    .column(Column::new("value").unwrap().with_type(ColumnType::Real))
                    .column(Column::new("taken_at").unwrap().with_type(ColumnType::Timestamp)),
            )
            .unwrap();
        assert_eq!(
            SQLExporter::create_table(schema.table(id).unwrap()),
            "create table if not exists readings (\n  id integer primary key,\n  value real,\n  taken_at timestamp\n);"
        );
    }

    #[test]
    fn test_composite_primary_key_and_foreign_key() {
        let mut schema = Schema::new();
        let companies = schema
            .add_table(
                TableBuilder::new("companies")
                    .top_tag("companies/company")
                    .column(Column::new("code").unwrap().with_type(ColumnType::Char(8)).primary_key()),
            )
            .unwrap();
        let id = schema
            .add_table(
                TableBuilder::new("contracts")
                    .top_tag("contracts/contract")
                    .column(Column::new("company").unwrap().with_type(ColumnType::Char(8)).not_null())
                    .column(Column::new("contract_no").unwrap().not_null())
                    .primary_key(["company", "contract_no"])
                    .foreign_key(ForeignKey::new("company", companies, "code")),
            )
            .unwrap();
        assert_eq!(
            SQLExporter::create_table(schema.table(id).unwrap()),
            "create table if not exists contracts (\n  company char(8) not null,\n  contract_no text not null,\n  foreign key (company) references companies (code),\n  primary key (company, contract_no)\n);"
        );
    }

    #[test]
    fn test_create_indexes() {
        let schema = schema();
        let indexes = SQLExporter::create_indexes(schema.table_by_name("employers").unwrap());
        assert_eq!(
            indexes,
            vec!["create index if not exists employers_parent_idx on employers (parent_hash);"]
        );
    }

    #[test]
    fn test_export_is_repeatable() {
        let schema = schema();
        let first = SQLExporter.export(&schema).unwrap();
        let second = SQLExporter.export(&schema).unwrap();
        assert_eq!(first.format, "sql");
        assert_eq!(first.content, second.content);
        let people = first.content.find("people (").unwrap();
        let employers = first.content.find("employers (").unwrap();
        assert!(people < employers);
    }
}
