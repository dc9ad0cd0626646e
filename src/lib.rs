//! Order-insensitive assertions for records and database tables.
//!
//! Lets a test assert that expected data (usually written as plain text)
//! and actual data read back from a store are the same, even when the store
//! returns numbers, decimals, dates or bytes for values the test wrote as
//! strings, and even when row order is not significant.
//!
//! - [`assertion`] - panicking `assert_*` functions for use in tests
//! - [`config`] - YAML configuration for options and table definitions
//! - [`logging`] - tracing setup for tests
//!
//! The `Result`-returning engine is re-exported as [`verify`].
//!
//! # Example
//!
//! ```
//! use record_assert::{assert_table_equals, Record, Table};
//!
//! let users = |id: i64, name: &str| Record::builder().field("ID", id).field("NAME", name).build();
//! let expected = Table::new(
//!     "USERS",
//!     ["ID", "NAME"],
//!     ["ID"],
//!     vec![
//!         Record::builder().field("ID", "1").field("NAME", "alice").build(),
//!         Record::builder().field("ID", "2").field("NAME", "bob").build(),
//!     ],
//! )
//! .unwrap();
//! let actual = expected
//!     .with_rows(vec![users(2, "bob"), users(1, "alice")])
//!     .unwrap();
//!
//! assert_table_equals("", &expected, &actual);
//! ```

pub mod assertion;
pub mod config;
pub mod logging;

pub use record_verify as verify;

pub use assertion::{
    assert_equals_as_string, assert_equals_ignoring_order, assert_equals_ignoring_order_by,
    assert_record_equals, assert_record_list_equals, assert_records_equal_ignoring_order,
    assert_table_equals, assert_tables_equal, fail_comparing, Assertions,
};
pub use config::{AssertConfig, CONFIG_ENV_VAR};
pub use record_core::{DatabaseSchema, Record, Table, TableDefinition, Value};
pub use record_verify::{CompareOptions, ComparisonFailure, Mismatch};
