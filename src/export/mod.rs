//! Export functionality
//!
//! Provides exporters for:
//! - SQL (`create table` / `create index` statements)
//! - JSON (rows read from XML, for downstream loaders)

pub mod json;
pub mod sql;

/// Result of an export operation
#[derive(Debug)]
pub struct ExportResult {
    /// Exported content
    pub content: String,
    /// Format identifier
    pub format: String,
}

/// Error during export
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("Serialization error: {0}")]
    SerializationError(String),
    #[error("Validation error: {0}")]
    ValidationError(String),
}

impl From<crate::validation::ValidationError> for ExportError {
    fn from(err: crate::validation::ValidationError) -> Self {
        ExportError::ValidationError(err.to_string())
    }
}

impl From<serde_json::Error> for ExportError {
    fn from(err: serde_json::Error) -> Self {
        ExportError::SerializationError(err.to_string())
    }
}

// Re-export for convenience
pub use json::JsonRowExporter;
pub use sql::SQLExporter;
