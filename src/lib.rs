//! XML ORM SDK - maps nested XML records onto relational tables
//!
//! Provides:
//! - Table and column declarations, including embedded tables nested inside a
//!   parent table's records
//! - `create table` text for every declared table
//! - Reading XML documents into rows, with content-derived `hash_id` surrogate
//!   keys and `parent_hash` links from embedded rows to their parent
//! - Schema declaration from YAML/TOML configuration

pub mod export;
pub mod import;
pub mod model;
pub mod models;
pub mod validation;

// Re-export commonly used types
pub use export::{ExportError, ExportResult, JsonRowExporter, SQLExporter};
pub use import::{HashKeyDeriver, ImportError, RowBuilder, TableReader, XmlDocument, XmlRecordWalker};
pub use model::{LoadError, SchemaLoader};
pub use models::{Column, ColumnType, ForeignKey, Index, Row, Schema, Table, TableBuilder, TableId, TagPath};
pub use validation::ValidationError;
