//! Import functionality
//!
//! Reads XML documents into table rows:
//! - `xml`: parsed element tree
//! - `walker`: resolves record and embedded-record tag paths
//! - `hash_key`: content-derived surrogate keys
//! - `row_builder`: one row per data node
//! - `reader`: the per-table read algorithm

pub mod hash_key;
pub mod reader;
pub mod row_builder;
pub mod walker;
pub mod xml;

use crate::validation::ValidationError;
use std::path::PathBuf;

/// Error during import
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("XML file not found: {}", .0.display())]
    MissingFile(PathBuf),
    #[error("IO error reading {}: {message}", .path.display())]
    Io { path: PathBuf, message: String },
    #[error("Malformed document {source_name}: {reason}")]
    MalformedDocument { source_name: String, reason: String },
    #[error("Table '{table}', record {record}: not-null column '{column}' has no tag")]
    MissingColumnData {
        table: String,
        column: String,
        record: usize,
    },
    #[error("Table '{table}' must be read after its parent '{parent}'")]
    ParentNotRead { table: String, parent: String },
    #[error("Unknown table: {0}")]
    UnknownTable(String),
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

// Re-export for convenience
pub use hash_key::{HashKeyDeriver, NULL_SENTINEL};
pub use reader::TableReader;
pub use row_builder::RowBuilder;
pub use walker::XmlRecordWalker;
pub use xml::{XmlDocument, XmlElement};
