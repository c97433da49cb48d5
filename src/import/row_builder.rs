//! Builds one row from one XML data node

use super::ImportError;
use super::hash_key::HashKeyDeriver;
use super::xml::XmlElement;
use crate::models::{ColumnKind, Row, Table};
use std::collections::BTreeMap;

pub struct RowBuilder<'t> {
    table: &'t Table,
}

impl<'t> RowBuilder<'t> {
    pub fn new(table: &'t Table) -> Self {
        Self { table }
    }

    /// Build the row for `node`.
    ///
    /// Declared columns take the text of the first like-named child element. An
    /// absent element is null, and so is a container element holding only
    /// child elements. `hash_id` is derived from the hash key columns
    /// and `parent_hash` is the caller-supplied parent key. `record` is the
    /// 1-based position of the node, used in error messages.
    pub fn build(
        &self,
        node: &XmlElement,
        parent_hash: Option<&str>,
        record: usize,
    ) -> Result<Row, ImportError> {
        let mut values: BTreeMap<String, Option<String>> = BTreeMap::new();

        for column in self.table.columns() {
            let value = match column.kind() {
                ColumnKind::Declared => {
                    let value = Self::extract(node, column.name());
                    if value.is_none() && column.is_not_null() {
                        return Err(ImportError::MissingColumnData {
                            table: self.table.name().to_string(),
                            column: column.name().to_string(),
                            record,
                        });
                    }
                    value.map(str::to_string)
                }
                ColumnKind::HashId => self.hash_id(node),
                ColumnKind::ParentHash { .. } => parent_hash.map(str::to_string),
            };
            values.insert(column.name().to_string(), value);
        }

        Ok(Row::new(values))
    }

    /// Surrogate key of the record held in `node`, `None` without a hash key.
    ///
    /// Reads only the hash key columns, so a child read can recompute its
    /// parent's key from the parent's node.
    pub fn hash_id(&self, node: &XmlElement) -> Option<String> {
        self.table.hash_key().map(|columns| {
            HashKeyDeriver::derive(columns.iter().map(|column| Self::extract(node, column)))
        })
    }

    fn extract<'n>(node: &'n XmlElement, column: &str) -> Option<&'n str> {
        node.child(column).and_then(XmlElement::text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::import::xml::XmlDocument;
    use crate::models::{Column, Schema, TableBuilder};

    fn people_schema() -> (Schema, crate::models::TableId) {
        let mut schema = Schema::new();
        let id = schema
            .add_table(
                TableBuilder::new("people")
                    .top_tag("person/record")
                    .column(Column::new("name").unwrap().not_null())
                    .column(Column::new("last_name").unwrap())
                    .column(Column::new("nickname").unwrap())
                    .hash_key(["name", "last_name"]),
            )
            .unwrap();
        (schema, id)
    }

    #[test]
    fn test_build_row_with_hash_id() {
        let (schema, id) = people_schema();
        let table = schema.table(id).unwrap();
        let doc = XmlDocument::parse("<record><name>John</name><last_name>Doe</last_name></record>", "mem").unwrap();

        let row = RowBuilder::new(table).build(doc.root(), None, 1).unwrap();
        assert_eq!(row.get("name"), Some("John"));
        assert_eq!(row.get("last_name"), Some("Doe"));
        assert!(row.contains_column("nickname"));
        assert_eq!(row.get("nickname"), None);
        assert_eq!(row.hash_id(), Some(HashKeyDeriver::derive([Some("John"), Some("Doe")]).as_str()));
        assert!(!row.contains_column("parent_hash"));
    }

    #[test]
    fn test_missing_hash_key_value_uses_sentinel() {
        let (schema, id) = people_schema();
        let table = schema.table(id).unwrap();
        let doc = XmlDocument::parse("<record><name>John</name></record>", "mem").unwrap();

        let row = RowBuilder::new(table).build(doc.root(), None, 1).unwrap();
        assert_eq!(row.hash_id(), Some(HashKeyDeriver::derive([Some("John"), None]).as_str()));
    }

    #[test]
    fn test_missing_not_null_column() {
        let (schema, id) = people_schema();
        let table = schema.table(id).unwrap();
        let doc = XmlDocument::parse("<record><last_name>Doe</last_name></record>", "mem").unwrap();

        match RowBuilder::new(table).build(doc.root(), None, 3) {
            Err(ImportError::MissingColumnData { column, record, .. }) => {
                assert_eq!(column, "name");
                assert_eq!(record, 3);
            }
            other => panic!("expected missing column data, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_tag_satisfies_not_null() {
        let (schema, id) = people_schema();
        let table = schema.table(id).unwrap();
        let doc = XmlDocument::parse("<record><name/></record>", "mem").unwrap();

        let row = RowBuilder::new(table).build(doc.root(), None, 1).unwrap();
        assert_eq!(row.get("name"), Some(""));
    }

    #[test]
    fn test_container_column_is_null() {
        let (schema, id) = people_schema();
        let table = schema.table(id).unwrap();
        let doc = XmlDocument::parse(
            "<record><name>John</name>\n  <nickname>\n    <alias>Jack</alias>\n  </nickname>\n</record>",
            "mem",
        )
        .unwrap();

        let row = RowBuilder::new(table).build(doc.root(), None, 1).unwrap();
        assert!(row.contains_column("nickname"));
        assert_eq!(row.get("nickname"), None);
    }

    #[test]
    fn test_container_with_text_keeps_text() {
        let (schema, id) = people_schema();
        let table = schema.table(id).unwrap();
        let doc = XmlDocument::parse("<record><name>John<title>Dr</title></name></record>", "mem").unwrap();

        let row = RowBuilder::new(table).build(doc.root(), None, 1).unwrap();
        assert_eq!(row.get("name"), Some("John"));
    }
}
