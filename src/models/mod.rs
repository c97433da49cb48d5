//! Models module for the SDK
//!
//! Defines the declarations (columns, tables, keys, tag paths) and the rows produced
//! by reading XML documents.

pub mod column;
pub mod foreign_key;
pub mod index;
pub mod row;
pub mod schema;
pub mod table;
pub mod tag_path;

pub use column::{Column, ColumnKind, ColumnType, HASH_ID_COLUMN, PARENT_HASH_COLUMN};
pub use foreign_key::{ForeignKey, Reference};
pub use index::Index;
pub use row::Row;
pub use schema::Schema;
pub use table::{Table, TableBuilder, TableId};
pub use tag_path::TagPath;
