//! JSON exporter for rows read from XML
//!
//! Produces one JSON array of row objects per table. Null values are kept as
//! JSON `null`; every value is otherwise a string.

use crate::export::{ExportError, ExportResult};
use crate::models::{Schema, Table};
use serde_json::{Map, Value};

/// Exporter for row data as JSON
pub struct JsonRowExporter;

impl JsonRowExporter {
    /// Rows of one table as a pretty-printed JSON array
    pub fn export_table(table: &Table) -> Result<ExportResult, ExportError> {
        Ok(ExportResult {
            content: serde_json::to_string_pretty(table.rows())?,
            format: "json".to_string(),
        })
    }

    /// Rows of every table, keyed by table name
    pub fn export(&self, schema: &Schema) -> Result<ExportResult, ExportError> {
        let mut tables = Map::new();
        for id in schema.read_order()? {
            if let Some(table) = schema.table(id) {
                tables.insert(table.name().to_string(), serde_json::to_value(table.rows())?);
            }
        }
        Ok(ExportResult {
            content: serde_json::to_string_pretty(&Value::Object(tables))?,
            format: "json".to_string(),
        })
    }
}
