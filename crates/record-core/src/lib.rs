//! Core types for order-insensitive record assertions.
//!
//! This crate provides the data model that the comparison engine in
//! `record-verify` operates on:
//!
//! - [`Value`] - Dynamically typed cell value (text, numbers, decimals, dates, bytes, null)
//! - [`Record`] - Field name to value mapping
//! - [`Table`] - Named rows with declared columns and primary keys
//! - [`DatabaseSchema`] - Table definitions loaded from YAML
//! - [`normalize`] - Canonical textual form of a value
//!
//! # Example
//!
//! ```rust
//! use record_core::{normalize, Normalized, Record, Table, Value};
//!
//! let row = Record::builder().field("ID", 1).field("NAME", "alice").build();
//! let table = Table::new("USERS", ["ID", "NAME"], ["ID"], vec![row]).unwrap();
//!
//! assert_eq!(table.pk_values(0), "ID=1");
//! assert_eq!(normalize(&Value::Int(1)), Normalized::Text("1".to_string()));
//! ```

pub mod normalize;
pub mod schema;
pub mod table;
pub mod values;

// Re-exports for convenience
pub use normalize::{normalize, NormalizeOptions, Normalized, NULL_DISPLAY};
pub use schema::{DatabaseSchema, SchemaError, TableDefinition};
pub use table::Table;
pub use values::{Record, RecordBuilder, Value};
