//! Schema configuration
//!
//! Loads table declarations from configuration files.

pub mod loader;

pub use loader::{ColumnConfig, ForeignKeyConfig, LoadError, SchemaConfig, SchemaLoader, TableConfig};
